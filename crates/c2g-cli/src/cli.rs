use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan",
    version,
    about = "charmm2gmx - Convert CHARMM/CGenFF stream files into GROMACS topologies.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the .itp, .prm, .top and initial .pdb files for one residue.
    Convert(ConvertArgs),
    /// Parse a residue and report what a conversion would produce, without writing files.
    Inspect(InspectArgs),
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Residue name as written on its RESI record (e.g., LIG).
    #[arg(value_name = "RESNAME")]
    pub residue: String,

    /// Tripos mol2 file with the initial coordinates, atoms in RESI order.
    #[arg(value_name = "STRUCTURE.mol2")]
    pub structure: PathBuf,

    /// CHARMM stream file holding the residue topology and its parameters.
    #[arg(value_name = "STREAM.str")]
    pub stream: PathBuf,

    /// GROMACS force field directory (e.g., charmm36.ff).
    #[arg(value_name = "FFDIR")]
    pub forcefield_dir: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Residue name as written on its RESI record (e.g., LIG).
    #[arg(value_name = "RESNAME")]
    pub residue: String,

    /// CHARMM stream file holding the residue topology and its parameters.
    #[arg(value_name = "STREAM.str")]
    pub stream: PathBuf,

    /// GROMACS force field directory (e.g., charmm36.ff).
    #[arg(value_name = "FFDIR")]
    pub forcefield_dir: PathBuf,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Output overrides; only `convert` writes files.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputArgs {
    /// Directory receiving the generated files. Defaults to the current directory.
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Leave the water model include out of the .top file.
    #[arg(long)]
    pub no_water: bool,

    /// Leave the ions include out of the .top file.
    #[arg(long)]
    pub no_ions: bool,
}

/// Settings shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct SettingsArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the angle (degrees) above which dihedrals through it are dropped.
    #[arg(long, value_name = "DEGREES")]
    pub linear_cutoff: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S topology.nrexcl=2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_takes_four_positionals() {
        let cli = Cli::parse_from([
            "charmm2gmx",
            "convert",
            "LIG",
            "lig.mol2",
            "lig.str",
            "charmm36.ff",
            "-o",
            "out",
            "--no-ions",
            "-S",
            "topology.nrexcl=2",
            "-S",
            "output.water-model=tip4p",
        ]);
        let Commands::Convert(args) = cli.command else {
            panic!("Expected 'convert' subcommand");
        };
        assert_eq!(args.residue, "LIG");
        assert_eq!(args.structure, PathBuf::from("lig.mol2"));
        assert_eq!(args.stream, PathBuf::from("lig.str"));
        assert_eq!(args.forcefield_dir, PathBuf::from("charmm36.ff"));
        assert_eq!(args.output.output_dir, Some(PathBuf::from("out")));
        assert!(args.output.no_ions);
        assert!(!args.output.no_water);
        assert_eq!(
            args.settings.set_values,
            vec!["topology.nrexcl=2", "output.water-model=tip4p"]
        );
    }

    #[test]
    fn global_flags_apply_after_subcommand() {
        let cli = Cli::parse_from([
            "charmm2gmx",
            "inspect",
            "LIG",
            "lig.str",
            "ff",
            "-vv",
            "--log-file",
            "run.log",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
        assert!(matches!(cli.command, Commands::Inspect(_)));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["charmm2gmx", "-q", "-v", "inspect", "LIG", "a", "b"]);
        assert!(result.is_err());
    }

    #[test]
    fn convert_requires_structure() {
        let result = Cli::try_parse_from(["charmm2gmx", "convert", "LIG", "lig.str", "ff"]);
        assert!(result.is_err());
    }
}
