//! Unified error type for the export design engine
//!
//! [`OsweError`] separates bad inputs ([`OsweError::Config`]) from caller
//! ordering bugs ([`OsweError::Sequencing`]). File loading helpers surface
//! I/O and parse failures through the remaining variants.
//!
//! # Example
//!
//! ```ignore
//! use oswe_core::{OsweError, OsweResult};
//!
//! fn size_export(design: &mut ElectricalDesign) -> OsweResult<()> {
//!     design.run()?;
//!     let result = design.design_result()?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Error type for all design operations.
#[derive(Error, Debug)]
pub enum OsweError {
    /// Missing required input, unknown catalog entry, or a value that would
    /// produce a non-finite result downstream.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Results read before `run()` produced them.
    #[error("Sequencing error: {0}")]
    Sequencing(String),

    /// I/O errors while reading configuration or catalog files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using OsweError.
pub type OsweResult<T> = Result<T, OsweError>;

impl OsweError {
    /// Shorthand for a [`OsweError::Config`] built from any string-like value.
    pub fn config(msg: impl Into<String>) -> Self {
        OsweError::Config(msg.into())
    }

    /// Returns true for configuration errors.
    pub fn is_config(&self) -> bool {
        matches!(self, OsweError::Config(_))
    }

    /// Returns true for sequencing errors.
    pub fn is_sequencing(&self) -> bool {
        matches!(self, OsweError::Sequencing(_))
    }
}

impl From<anyhow::Error> for OsweError {
    fn from(err: anyhow::Error) -> Self {
        OsweError::Other(format!("{err:#}"))
    }
}

impl From<serde_json::Error> for OsweError {
    fn from(err: serde_json::Error) -> Self {
        OsweError::Parse(err.to_string())
    }
}

impl From<serde_yaml::Error> for OsweError {
    fn from(err: serde_yaml::Error) -> Self {
        OsweError::Parse(err.to_string())
    }
}
