//! Error types for the simulation engine.
//!
//! This module provides the fatal/configuration error type used throughout
//! the crate. Recoverable order-validation failures live in
//! [`crate::order::OrderError`]; everything here is either an environment
//! problem (I/O, parsing) or a caller error (bad configuration).

use std::error::Error as StdError;
use std::fmt;
use std::io;

/// Custom error type for the simulation engine.
///
/// This enum represents all errors that can occur during configuration,
/// state construction, and result output.
#[derive(Debug)]
pub enum SimulationError {
    /// Error occurred while reading a configuration file
    ConfigFileRead(io::Error),

    /// Error occurred while parsing YAML configuration
    YamlParse(String),

    /// Error occurred while parsing TOML configuration
    TomlParse(String),

    /// Configuration file has an unsupported extension
    UnsupportedConfigFormat(String),

    /// Configuration validation failed
    ValidationError(String),

    /// Error occurred while writing output files
    IoError(io::Error),

    /// Error occurred while serializing JSON output
    JsonSerialize(String),

    /// Error occurred while exporting to the results database
    DatabaseExport(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::ConfigFileRead(e) => {
                write!(f, "Failed to read configuration file: {}", e)
            }
            SimulationError::YamlParse(msg) => {
                write!(f, "Failed to parse YAML configuration: {}", msg)
            }
            SimulationError::TomlParse(msg) => {
                write!(f, "Failed to parse TOML configuration: {}", msg)
            }
            SimulationError::UnsupportedConfigFormat(ext) => {
                write!(
                    f,
                    "Unsupported configuration file format: '{}'. Use .yaml, .yml, or .toml",
                    ext
                )
            }
            SimulationError::ValidationError(msg) => {
                write!(f, "Configuration validation failed: {}", msg)
            }
            SimulationError::IoError(e) => {
                write!(f, "I/O error: {}", e)
            }
            SimulationError::JsonSerialize(msg) => {
                write!(f, "Failed to serialize JSON: {}", msg)
            }
            SimulationError::DatabaseExport(msg) => {
                write!(f, "Failed to export results database: {}", msg)
            }
        }
    }
}

impl StdError for SimulationError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            SimulationError::ConfigFileRead(e) | SimulationError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SimulationError {
    fn from(err: io::Error) -> Self {
        SimulationError::IoError(err)
    }
}

/// Type alias for Result with SimulationError
pub type Result<T> = std::result::Result<T, SimulationError>;
