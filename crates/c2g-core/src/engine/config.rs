use crate::core::forcefield::angle_types::DEFAULT_WILDCARD;
use crate::core::topology::generator::DEFAULT_LINEAR_CUTOFF;
use crate::core::topology::molecule::DEFAULT_NREXCL;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_WATER_MODEL: &str = "tip3p";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for {parameter}: {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopologyConfig {
    /// Angles whose equilibrium value exceeds this (degrees) are linear.
    pub linear_angle_cutoff: f64,
    /// Token matching any atom type in angle-type lookups; `None` disables wildcards.
    pub angle_wildcard: Option<String>,
    pub nrexcl: u32,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            linear_angle_cutoff: DEFAULT_LINEAR_CUTOFF,
            angle_wildcard: Some(DEFAULT_WILDCARD.to_string()),
            nrexcl: DEFAULT_NREXCL,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// Water model itp included by the `.top`; `None` leaves water out.
    pub water_model: Option<String>,
    pub include_ions: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    pub residue_name: String,
    pub stream_path: PathBuf,
    /// Structure file providing initial coordinates; without it no PDB is written.
    pub structure_path: Option<PathBuf>,
    pub forcefield_dir: PathBuf,
    pub topology: TopologyConfig,
    pub output: OutputConfig,
}

impl ConversionConfig {
    /// Output file stem: the residue name in lower case.
    pub fn file_stem(&self) -> String {
        self.residue_name.to_lowercase()
    }
}

#[derive(Default)]
pub struct ConversionConfigBuilder {
    residue_name: Option<String>,
    stream_path: Option<PathBuf>,
    structure_path: Option<PathBuf>,
    forcefield_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    linear_angle_cutoff: Option<f64>,
    angle_wildcard: Option<Option<String>>,
    nrexcl: Option<u32>,
    water_model: Option<Option<String>>,
    include_ions: Option<bool>,
}

impl ConversionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn residue_name(mut self, name: impl Into<String>) -> Self {
        self.residue_name = Some(name.into());
        self
    }
    pub fn stream_path(mut self, path: PathBuf) -> Self {
        self.stream_path = Some(path);
        self
    }
    pub fn structure_path(mut self, path: Option<PathBuf>) -> Self {
        self.structure_path = path;
        self
    }
    pub fn forcefield_dir(mut self, path: PathBuf) -> Self {
        self.forcefield_dir = Some(path);
        self
    }
    pub fn output_dir(mut self, path: PathBuf) -> Self {
        self.output_dir = Some(path);
        self
    }
    pub fn linear_angle_cutoff(mut self, degrees: f64) -> Self {
        self.linear_angle_cutoff = Some(degrees);
        self
    }
    pub fn angle_wildcard(mut self, token: Option<String>) -> Self {
        self.angle_wildcard = Some(token);
        self
    }
    pub fn nrexcl(mut self, nrexcl: u32) -> Self {
        self.nrexcl = Some(nrexcl);
        self
    }
    pub fn water_model(mut self, model: Option<String>) -> Self {
        self.water_model = Some(model);
        self
    }
    pub fn include_ions(mut self, include: bool) -> Self {
        self.include_ions = Some(include);
        self
    }

    pub fn build(self) -> Result<ConversionConfig, ConfigError> {
        let residue_name = self
            .residue_name
            .ok_or(ConfigError::MissingParameter("residue_name"))?;
        if residue_name.trim().is_empty() || residue_name.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                parameter: "residue_name",
                reason: format!("'{residue_name}' is not a single RESI token"),
            });
        }

        let defaults = TopologyConfig::default();
        let linear_angle_cutoff = self
            .linear_angle_cutoff
            .unwrap_or(defaults.linear_angle_cutoff);
        if !(0.0..=180.0).contains(&linear_angle_cutoff) {
            return Err(ConfigError::InvalidValue {
                parameter: "linear_angle_cutoff",
                reason: format!("{linear_angle_cutoff} is outside 0..=180 degrees"),
            });
        }

        Ok(ConversionConfig {
            residue_name,
            stream_path: self
                .stream_path
                .ok_or(ConfigError::MissingParameter("stream_path"))?,
            structure_path: self.structure_path,
            forcefield_dir: self
                .forcefield_dir
                .ok_or(ConfigError::MissingParameter("forcefield_dir"))?,
            topology: TopologyConfig {
                linear_angle_cutoff,
                angle_wildcard: self.angle_wildcard.unwrap_or(defaults.angle_wildcard),
                nrexcl: self.nrexcl.unwrap_or(defaults.nrexcl),
            },
            output: OutputConfig {
                directory: self
                    .output_dir
                    .ok_or(ConfigError::MissingParameter("output_dir"))?,
                water_model: self
                    .water_model
                    .unwrap_or_else(|| Some(DEFAULT_WATER_MODEL.to_string())),
                include_ions: self.include_ions.unwrap_or(true),
            },
        })
    }
}
