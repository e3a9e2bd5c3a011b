use std::path::PathBuf;
use thiserror::Error;

use super::config::ConfigError;
use crate::core::charmm::error::ParseError;
use crate::core::io::gromacs::forcefield::ForcefieldDirError;
use crate::core::io::mol2::Mol2Error;
use crate::core::io::pdb::PdbError;
use crate::core::models::graph::GraphError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Failed to parse stream file: {source}")]
    Parse {
        #[from]
        source: ParseError,
    },

    #[error("Invalid residue connectivity: {source}")]
    Graph {
        #[from]
        source: GraphError,
    },

    #[error(transparent)]
    ForceField(#[from] ForcefieldDirError),

    #[error("Failed to read structure file '{}': {source}", .path.display())]
    Structure {
        path: PathBuf,
        #[source]
        source: Mol2Error,
    },

    #[error("Failed to render initial structure: {source}")]
    Pdb {
        #[from]
        source: PdbError,
    },

    #[error("Structure file declares {found} {what}, but the residue has {expected}")]
    CoordinateMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
