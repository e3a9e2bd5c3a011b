use crate::cli::{InspectArgs, OutputArgs};
use crate::config::{ConversionInputs, PartialConversionConfig};
use crate::error::Result;
use charmm2gmx::engine::progress::ProgressReporter;
use charmm2gmx::workflows::{self, convert::ConversionSummary};
use std::fmt::Write;
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    let partial_config = PartialConversionConfig::load(args.settings.config.as_deref())?;
    let inputs = ConversionInputs {
        residue_name: args.residue,
        stream_path: args.stream,
        structure_path: None,
        forcefield_dir: args.forcefield_dir,
    };
    let config = partial_config.merge_with_cli(inputs, &args.settings, &OutputArgs::default())?;

    info!("Preparing conversion without writing outputs...");
    let result = workflows::convert::prepare(&config, &ProgressReporter::new())?;
    print!("{}", render_summary(&result.summary));
    Ok(())
}

pub fn render_summary(summary: &ConversionSummary) -> String {
    let mut out = String::new();
    let version = |v: &Option<String>| v.clone().unwrap_or_else(|| "unknown".to_string());

    let _ = writeln!(out, "Residue {}", summary.residue_name);
    let _ = writeln!(out, "  atoms               {:>6}", summary.atoms);
    let _ = writeln!(
        out,
        "  bonds               {:>6} ({} declared)",
        summary.bonds, summary.declared_bonds
    );
    let _ = writeln!(out, "  pairs               {:>6}", summary.pairs);
    let _ = writeln!(out, "  angles              {:>6}", summary.angles);
    let _ = writeln!(
        out,
        "  dihedrals           {:>6} ({} generated)",
        summary.dihedrals_retained, summary.dihedrals_generated
    );
    let _ = writeln!(out, "  impropers           {:>6}", summary.impropers);
    let _ = writeln!(out, "  parameter records   {:>6}", summary.parameter_records);
    let _ = writeln!(out, "  nonbonded records   {:>6}", summary.nonbonded_records);
    let _ = writeln!(out, "  cmap records        {:>6}", summary.cmap_records);
    let _ = writeln!(
        out,
        "  CGenFF version      stream {} / force field {}",
        version(&summary.stream_cgenff_version),
        version(&summary.forcefield_cgenff_version)
    );
    if !summary.unresolved_mass_types.is_empty() {
        let _ = writeln!(
            out,
            "  unresolved masses   {}",
            summary.unresolved_mass_types.join(", ")
        );
    }
    out
}
