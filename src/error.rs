//! Error types for the vcman library

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for vcman operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the vcman library
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Settings Errors
    // -------------------------------------------------------------------------
    #[error("Setting not found: {0}")]
    UnknownSetting(String),

    #[error("Invalid integer value for {name}: '{value}'")]
    InvalidIntegerFormat { name: String, value: String },

    #[error("Invalid boolean value for {name}: '{value}'")]
    InvalidBooleanFormat { name: String, value: String },

    #[error("Invalid value for {name}: '{value}' does not match pattern {pattern}")]
    PatternMismatch {
        name: String,
        value: String,
        pattern: String,
    },

    #[error("Value out of range for {name}: {reason}")]
    ValueOutOfRange { name: String, reason: String },

    #[error("Invalid pattern for {name}: {reason}")]
    InvalidPattern { name: String, reason: String },

    #[error("Validation failed for {name}: {errors}")]
    Validation {
        name: String,
        errors: ValidationErrors,
    },

    // -------------------------------------------------------------------------
    // Addon Errors
    // -------------------------------------------------------------------------
    #[error("Addon not found: {0}")]
    UnknownAddon(String),

    #[error("Invalid enable/disable value for addon {addon}: '{value}'")]
    InvalidToggleValue { addon: String, value: String },

    #[error("Failed to enable addon '{addon}': {source}")]
    AddonEnable {
        addon: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to disable addon '{addon}': {source}")]
    AddonDisable {
        addon: String,
        #[source]
        source: Box<Error>,
    },

    // -------------------------------------------------------------------------
    // Cluster Errors
    // -------------------------------------------------------------------------
    #[error("Cluster is not running: {0}")]
    ClusterNotRunning(String),

    #[error("Failed to connect to host '{host}': {source}")]
    Connection {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Remote session error: {0}")]
    Session(String),

    // -------------------------------------------------------------------------
    // Remote File Errors
    // -------------------------------------------------------------------------
    #[error("Failed to write remote file '{path}': {reason}")]
    RemoteWrite { path: PathBuf, reason: String },

    #[error("Failed to delete remote file '{path}': {reason}")]
    RemoteDelete { path: PathBuf, reason: String },
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::UnknownSetting(_) | Error::UnknownAddon(_))
    }

    /// Check if this is a setting validation error (aggregated or single)
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::Validation { .. }
                | Error::InvalidIntegerFormat { .. }
                | Error::InvalidBooleanFormat { .. }
                | Error::PatternMismatch { .. }
                | Error::ValueOutOfRange { .. }
        )
    }

    /// Check if this error originated from a remote file operation
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::RemoteWrite { .. } | Error::RemoteDelete { .. })
    }
}

/// Ordered collection of setter failures from one setting write.
///
/// Every setter registered for a setting runs even when an earlier one fails;
/// each failure is collected here in registration order. An empty collection
/// is never surfaced as an error.
#[derive(Debug, Default)]
pub struct ValidationErrors(Vec<Error>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Record a setter failure
    pub fn push(&mut self, err: Error) {
        self.0.push(err);
    }

    /// Number of failed setters
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate failures in setter-registration order
    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl IntoIterator for ValidationErrors {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
