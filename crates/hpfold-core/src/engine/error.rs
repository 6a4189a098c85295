use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::IoError;
use crate::core::models::error::ModelError;
use crate::core::saw::SawError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Invalid model input: {source}")]
    Model {
        #[from]
        source: ModelError,
    },

    #[error("Chain mutation failed: {source}")]
    Walk {
        #[from]
        source: SawError,
    },

    #[error("Record I/O failed: {source}")]
    Io {
        #[from]
        source: IoError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
