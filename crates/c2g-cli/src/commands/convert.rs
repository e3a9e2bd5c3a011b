use crate::cli::ConvertArgs;
use crate::config::{ConversionInputs, PartialConversionConfig};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use charmm2gmx::{engine::progress::ProgressReporter, workflows};
use tracing::{info, warn};

pub fn run(args: ConvertArgs) -> Result<()> {
    let partial_config = PartialConversionConfig::load(args.settings.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let inputs = ConversionInputs {
        residue_name: args.residue,
        stream_path: args.stream,
        structure_path: Some(args.structure),
        forcefield_dir: args.forcefield_dir,
    };
    let config = partial_config.merge_with_cli(inputs, &args.settings, &args.output)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Converting residue {}...", config.residue_name);
    info!("Invoking the conversion workflow...");
    let outcome = workflows::convert::run(&config, &reporter);
    progress_handler.clear();
    let result = outcome?;

    for path in result.paths() {
        println!("  wrote {}", path.display());
    }

    let unresolved = &result.summary.unresolved_mass_types;
    if !unresolved.is_empty() {
        warn!(types = ?unresolved, "Some atom types have no mass.");
        println!(
            "Warning: no mass found for atom type(s) {}; written as 0.0.",
            unresolved.join(", ")
        );
    }
    Ok(())
}
