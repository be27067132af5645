//! Error taxonomy for configuration loading and lookup.
//!
//! Load-time errors (`ConfigDirectoryNotFound`, `MalformedConfigFile`,
//! `MissingEnvironmentVariable`, `UnsupportedValueType`, `EmptyConfiguration`,
//! `StrictModeViolation`) abort the whole load; no partial namespace is ever
//! exposed. Query-time errors (`KeyNotFound`, `NullValue`, `TypeMismatch`)
//! are local to one lookup.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// All the ways configuration resolution can fail.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration directory could be located.
    #[error("config directory not found: {0}")]
    ConfigDirectoryNotFound(String),

    /// A config file exists but could not be read or parsed.
    #[error("malformed config file {}: {cause}", .path.display())]
    MalformedConfigFile { path: PathBuf, cause: String },

    /// An environment-overlay file named a variable that is unset or empty.
    #[error("environment variable {0} not set")]
    MissingEnvironmentVariable(String),

    /// A loader met a value it cannot normalize into a [`ConfigValue`].
    ///
    /// [`ConfigValue`]: crate::value::ConfigValue
    #[error("unsupported config value at key {key} in {}", .path.display())]
    UnsupportedValueType { path: PathBuf, key: String },

    /// Every file was processed but nothing was loaded, in strict mode.
    #[error("no configuration values loaded from {}", .dir.display())]
    EmptyConfiguration { dir: PathBuf },

    /// Strict-mode validation failed.
    #[error("strict mode violation: {0}")]
    StrictModeViolation(String),

    /// Lookup of a key that is not in the namespace.
    #[error("config key {key} not found{}", similar_hint(.similar))]
    KeyNotFound { key: String, similar: Vec<String> },

    /// The key exists but holds an explicit null.
    #[error("config key {0} is null")]
    NullValue(String),

    /// The key exists but its value cannot be cast to the requested type.
    #[error("config key {key}: expected {expected}, found {actual}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl ConfigError {
    /// Shorthand for a parse/read failure on one file.
    pub fn malformed(path: &std::path::Path, cause: impl std::fmt::Display) -> Self {
        Self::MalformedConfigFile {
            path: path.to_owned(),
            cause: cause.to_string(),
        }
    }
}

/// Render the similar-key suffix for `KeyNotFound` messages.
fn similar_hint(similar: &[String]) -> String {
    if similar.is_empty() {
        String::new()
    } else {
        format!(" (similar keys: {})", similar.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_not_found_lists_suggestions() {
        let err = ConfigError::KeyNotFound {
            key: "db.hosst".to_string(),
            similar: vec!["db.host".to_string(), "db.port".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "config key db.hosst not found (similar keys: db.host, db.port)"
        );
    }

    #[test]
    fn test_key_not_found_without_suggestions() {
        let err = ConfigError::KeyNotFound {
            key: "redis.url".to_string(),
            similar: Vec::new(),
        };
        assert_eq!(err.to_string(), "config key redis.url not found");
    }

    #[test]
    fn test_type_mismatch_names_both_kinds() {
        let err = ConfigError::TypeMismatch {
            key: "db.host".to_string(),
            expected: "int",
            actual: "string",
        };
        assert_eq!(
            err.to_string(),
            "config key db.host: expected int, found string"
        );
    }
}
