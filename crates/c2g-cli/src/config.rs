use crate::cli::{OutputArgs, SettingsArgs};
use crate::error::{CliError, Result};
use charmm2gmx::engine::config as core_config;
use charmm2gmx::engine::error::EngineError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_OUTPUT_DIR: &str = ".";

/// Values that disable an optional include or the wildcard token.
const DISABLED_VALUES: [&str; 2] = ["", "none"];

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialTopologyConfig {
    linear_angle_cutoff: Option<f64>,
    angle_wildcard: Option<String>,
    nrexcl: Option<u32>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialOutputConfig {
    directory: Option<PathBuf>,
    water_model: Option<String>,
    include_ions: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConversionConfig {
    topology: Option<PartialTopologyConfig>,
    output: Option<PartialOutputConfig>,
}

/// What a run converts; always given on the command line.
#[derive(Debug, Clone)]
pub struct ConversionInputs {
    pub residue_name: String,
    pub stream_path: PathBuf,
    pub structure_path: Option<PathBuf>,
    pub forcefield_dir: PathBuf,
}

impl PartialConversionConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `path` when given, otherwise starts from built-in defaults only.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_cli(
        mut self,
        inputs: ConversionInputs,
        settings: &SettingsArgs,
        output: &OutputArgs,
    ) -> Result<core_config::ConversionConfig> {
        self.apply_set_values(&settings.set_values)?;

        let topology = self.topology.take().unwrap_or_default();
        let file_output = self.output.take().unwrap_or_default();

        let mut builder = core_config::ConversionConfigBuilder::new()
            .residue_name(inputs.residue_name)
            .stream_path(inputs.stream_path)
            .structure_path(inputs.structure_path)
            .forcefield_dir(inputs.forcefield_dir)
            .output_dir(
                output
                    .output_dir
                    .clone()
                    .or(file_output.directory)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            );

        if let Some(cutoff) = settings.linear_cutoff.or(topology.linear_angle_cutoff) {
            builder = builder.linear_angle_cutoff(cutoff);
        }
        if let Some(wildcard) = topology.angle_wildcard {
            builder = builder.angle_wildcard(enabled(wildcard));
        }
        if let Some(nrexcl) = topology.nrexcl {
            builder = builder.nrexcl(nrexcl);
        }

        if output.no_water {
            builder = builder.water_model(None);
        } else if let Some(model) = file_output.water_model {
            builder = builder.water_model(enabled(model));
        }
        if output.no_ions {
            builder = builder.include_ions(false);
        } else if let Some(include) = file_output.include_ions {
            builder = builder.include_ions(include);
        }

        Ok(builder.build().map_err(EngineError::from)?)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let rejected = |reason: String| CliError::Override {
                entry: kv_pair.clone(),
                reason,
            };
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(rejected("expected KEY=VALUE".to_string()));
            };
            let invalid = |kind: &str| rejected(format!("'{}' is not a valid {}", value_str, kind));

            match key {
                "topology.linear-angle-cutoff" => {
                    self.topology
                        .get_or_insert_with(Default::default)
                        .linear_angle_cutoff =
                        Some(value_str.parse().map_err(|_| invalid("float"))?);
                }
                "topology.angle-wildcard" => {
                    self.topology
                        .get_or_insert_with(Default::default)
                        .angle_wildcard = Some(value_str.to_string());
                }
                "topology.nrexcl" => {
                    self.topology.get_or_insert_with(Default::default).nrexcl =
                        Some(value_str.parse().map_err(|_| invalid("integer"))?);
                }
                "output.directory" => {
                    self.output.get_or_insert_with(Default::default).directory =
                        Some(PathBuf::from(value_str));
                }
                "output.water-model" => {
                    self.output.get_or_insert_with(Default::default).water_model =
                        Some(value_str.to_string());
                }
                "output.include-ions" => {
                    self.output.get_or_insert_with(Default::default).include_ions =
                        Some(value_str.parse().map_err(|_| invalid("boolean"))?);
                }
                _ => return Err(rejected(format!("unsupported key '{}'", key))),
            }
        }
        Ok(())
    }
}

fn enabled(value: String) -> Option<String> {
    if DISABLED_VALUES.contains(&value.trim().to_ascii_lowercase().as_str()) {
        None
    } else {
        Some(value)
    }
}
