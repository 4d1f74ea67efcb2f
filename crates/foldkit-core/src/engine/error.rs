use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::pdb::PdbError;
use crate::core::models::measurement::MeasurementError;
use crate::core::models::residue::ResidueError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Sequence validation failed: {0}")]
    Validation(String),

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Residue conversion failed: {source}")]
    Residue {
        #[from]
        source: ResidueError,
    },

    #[error("Measurement failed: {source}")]
    Measurement {
        #[from]
        source: MeasurementError,
    },

    #[error("Structure serialization failed: {source}")]
    Serialization {
        #[from]
        source: PdbError,
    },
}
