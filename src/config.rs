//! The resolution facade.
//!
//! [`Config::load_with`] runs the whole pipeline (directory resolution,
//! file discovery, ordered merge) once and returns an owned, immutable
//! value. Lookups never mutate; a query failure leaves the namespace
//! untouched, and re-loading means constructing a new `Config`.

use crate::discovery;
use crate::env;
use crate::error::{ConfigError, Result};
use crate::merge;
use crate::paths;
use crate::value::{ConfigValue, FromConfigValue, Namespace};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Maximum number of similar keys attached to a `KeyNotFound`.
const MAX_SUGGESTIONS: usize = 3;

/// Keys at or beyond this distance are not suggested.
const SUGGESTION_THRESHOLD: usize = 4;

/// Options controlling strictness and explicit overrides, resolved once at
/// load time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Require an environment-specific config file, forbid `default` and
    /// `local` as the active environment, and make an empty result fatal.
    pub strict: bool,

    /// Silence the warning emitted when the directory yields no values.
    pub suppress_empty_warning: bool,

    /// Explicit config directory, bypassing `LAYERCONF_CONFIG_DIR` and the
    /// executable walk-up. Must exist and be a directory.
    pub dir: Option<PathBuf>,

    /// Explicit active environment name, bypassing `LAYERCONF_ENV`.
    pub environment: Option<String>,
}

/// An immutable, fully resolved configuration namespace.
///
/// Safe for unsynchronized concurrent reads once constructed.
#[derive(Debug, Clone)]
pub struct Config {
    values: Namespace,
    environment: String,
    dir: PathBuf,
}

impl Config {
    /// Load using process-environment defaults (`LAYERCONF_ENV`,
    /// `LAYERCONF_CONFIG_DIR`) and lenient options.
    pub fn load() -> Result<Self> {
        Self::load_with(LoadOptions::default())
    }

    /// Load with explicit options.
    pub fn load_with(options: LoadOptions) -> Result<Self> {
        let environment = options
            .environment
            .clone()
            .unwrap_or_else(env::active_environment);

        if options.strict && (environment == "default" || environment == "local") {
            return Err(ConfigError::StrictModeViolation(format!(
                "active environment must not be named {environment}"
            )));
        }

        let dir = match &options.dir {
            Some(dir) if dir.is_dir() => dir.clone(),
            Some(dir) => {
                return Err(ConfigError::ConfigDirectoryNotFound(format!(
                    "{} does not exist or is not a directory",
                    dir.display()
                )));
            }
            None => paths::resolve_config_dir(env::config_dir_override().as_deref())?,
        };

        info!(
            dir = %dir.display(),
            environment = %environment,
            "resolving configuration"
        );

        let files = discovery::discover(&dir, &environment)?;

        if options.strict && !files.iter().any(|f| f.stem == environment) {
            return Err(ConfigError::StrictModeViolation(format!(
                "no config file for environment {environment} in {}",
                dir.display()
            )));
        }

        let mut values = Namespace::new();
        merge::merge_files(&dir, &files, options.strict, &mut values)?;

        if values.is_empty() && !options.suppress_empty_warning {
            warn!(dir = %dir.display(), "no configuration values loaded");
        }

        Ok(Self {
            values,
            environment,
            dir,
        })
    }

    /// Typed lookup by dotted key path.
    ///
    /// Fails with `KeyNotFound` (carrying up to three similar keys),
    /// `NullValue`, or `TypeMismatch`.
    pub fn get<T: FromConfigValue>(&self, key: &str) -> Result<T> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| self.key_not_found(key))?;
        if value.is_null() {
            return Err(ConfigError::NullValue(key.to_string()));
        }
        T::from_config_value(value).ok_or_else(|| ConfigError::TypeMismatch {
            key: key.to_string(),
            expected: T::EXPECTED,
            actual: value.kind(),
        })
    }

    /// Like [`get`](Self::get), but absence and null yield `Ok(None)`.
    /// A present value of the wrong type still fails.
    pub fn get_optional<T: FromConfigValue>(&self, key: &str) -> Result<Option<T>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(value) if value.is_null() => Ok(None),
            Some(value) => T::from_config_value(value)
                .map(Some)
                .ok_or_else(|| ConfigError::TypeMismatch {
                    key: key.to_string(),
                    expected: T::EXPECTED,
                    actual: value.kind(),
                }),
        }
    }

    /// Like [`get_optional`](Self::get_optional), with `fallback`
    /// substituted for "no value".
    pub fn get_or<T: FromConfigValue>(&self, key: &str, fallback: T) -> Result<T> {
        Ok(self.get_optional(key)?.unwrap_or(fallback))
    }

    /// Untyped lookup.
    ///
    /// An exact key returns its stored value. Otherwise every key
    /// containing `key` as a substring aggregates, rendered as strings,
    /// into a `StringList` in namespace insertion order, which is how
    /// exploded arrays (`roles.0`, `roles.1`) come back as one list. The
    /// substring match is deliberately loose (`port` also matches
    /// `report`); prefer the typed accessors for exact lookups.
    pub fn value(&self, key: &str) -> Result<ConfigValue> {
        if let Some(value) = self.values.get(key) {
            return Ok(value.clone());
        }
        let matches: Vec<String> = self
            .values
            .iter()
            .filter(|(stored, _)| stored.contains(key))
            .map(|(_, value)| value.render())
            .collect();
        if matches.is_empty() {
            return Err(self.key_not_found(key));
        }
        Ok(ConfigValue::StringList(matches))
    }

    /// True iff `key` is an exact key in the namespace (a null value still
    /// exists).
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The active environment name this configuration was resolved for.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// The directory the configuration was loaded from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All keys, in insertion (document/precedence) order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn key_not_found(&self, key: &str) -> ConfigError {
        ConfigError::KeyNotFound {
            key: key.to_string(),
            similar: self.similar_keys(key),
        }
    }

    /// Up to three stored keys cheaply similar to `key`, closest first.
    fn similar_keys(&self, key: &str) -> Vec<String> {
        let mut scored: Vec<(usize, &String)> = self
            .values
            .keys()
            .filter_map(|stored| {
                let distance = key_distance(key, stored);
                (distance < SUGGESTION_THRESHOLD).then_some((distance, stored))
            })
            .collect();
        scored.sort();
        scored
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, stored)| stored.clone())
            .collect()
    }
}

/// Cheap spelling distance: mismatched characters across the common prefix
/// plus the length difference.
fn key_distance(a: &str, b: &str) -> usize {
    let mismatches = a
        .bytes()
        .zip(b.bytes())
        .filter(|(x, y)| x != y)
        .count();
    mismatches + a.len().abs_diff(b.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load_dir(temp: &TempDir, environment: &str) -> Config {
        Config::load_with(LoadOptions {
            dir: Some(temp.path().to_owned()),
            environment: Some(environment.to_string()),
            ..LoadOptions::default()
        })
        .unwrap()
    }

    #[test]
    fn test_typed_get_round_trips() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("default.json"),
            r#"{"db": {"host": "localhost", "port": 3306}, "auth": {"enabled": false}}"#,
        )
        .unwrap();

        let config = load_dir(&temp, "test");
        assert_eq!(config.get::<String>("db.host").unwrap(), "localhost");
        assert_eq!(config.get::<i64>("db.port").unwrap(), 3306);
        assert!(!config.get::<bool>("auth.enabled").unwrap());
        assert!(config.has("db.host"));
        assert!(!config.has("db.user"));
    }

    #[test]
    fn test_get_optional_and_default() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("default.json"), r#"{"db": {"port": 3306}}"#).unwrap();

        let config = load_dir(&temp, "test");
        assert_eq!(config.get_optional::<i64>("db.port").unwrap(), Some(3306));
        assert_eq!(config.get_optional::<i64>("redis.port").unwrap(), None);
        assert_eq!(config.get_or::<i64>("redis.port", 6379).unwrap(), 6379);
    }

    #[test]
    fn test_wrong_type_fails_even_for_optional() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("default.json"), r#"{"db": {"host": "localhost"}}"#)
            .unwrap();

        let config = load_dir(&temp, "test");
        let err = config.get::<i64>("db.host").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TypeMismatch {
                expected: "int",
                actual: "string",
                ..
            }
        ));
        assert!(config.get_optional::<i64>("db.host").is_err());
    }

    #[test]
    fn test_null_value_is_distinguished_from_absence() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("default.json"), r#"{"feature": null}"#).unwrap();

        let config = load_dir(&temp, "test");
        assert!(config.has("feature"));
        assert!(matches!(
            config.get::<String>("feature").unwrap_err(),
            ConfigError::NullValue(_)
        ));
        assert_eq!(config.get_optional::<String>("feature").unwrap(), None);
    }

    #[test]
    fn test_missing_key_suggests_similar_spellings() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("default.json"),
            r#"{"no": {"such": {"keyy": 1}}, "unrelated": 2}"#,
        )
        .unwrap();

        let config = load_dir(&temp, "test");
        let err = config.get::<i64>("no.such.key").unwrap_err();
        match err {
            ConfigError::KeyNotFound { similar, .. } => {
                assert_eq!(similar, vec!["no.such.keyy".to_string()]);
            }
            other => panic!("expected KeyNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_untyped_value_exact_key() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("default.json"), r#"{"db": {"port": 3306}}"#).unwrap();

        let config = load_dir(&temp, "test");
        assert_eq!(config.value("db.port").unwrap(), ConfigValue::Int(3306));
    }

    #[test]
    fn test_untyped_value_aggregates_exploded_array_in_document_order() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("default.json"),
            r#"{"roles": [{"name": "admin"}, {"name": "user"}]}"#,
        )
        .unwrap();

        let config = load_dir(&temp, "test");
        assert_eq!(
            config.value("roles").unwrap(),
            ConfigValue::StringList(vec!["admin".to_string(), "user".to_string()])
        );
    }

    #[test]
    fn test_untyped_value_substring_is_ambiguous_across_unrelated_keys() {
        // Legacy-compatibility behavior: the substring match is loose on
        // purpose, so "port" picks up both db.port and report.
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("default.json"),
            r#"{"db": {"port": 3306}, "report": "daily"}"#,
        )
        .unwrap();

        let config = load_dir(&temp, "test");
        assert_eq!(
            config.value("port").unwrap(),
            ConfigValue::StringList(vec!["3306".to_string(), "daily".to_string()])
        );
    }

    #[test]
    fn test_untyped_value_without_any_match_fails() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("default.json"), r#"{"db": {"port": 3306}}"#).unwrap();

        let config = load_dir(&temp, "test");
        assert!(matches!(
            config.value("redis").unwrap_err(),
            ConfigError::KeyNotFound { .. }
        ));
    }

    #[test]
    fn test_empty_directory_is_lenient_by_default() {
        let temp = TempDir::new().unwrap();
        let config = load_dir(&temp, "test");
        assert!(config.is_empty());
    }

    #[test]
    fn test_strict_mode_rejects_default_and_local_environments() {
        let temp = TempDir::new().unwrap();
        for name in ["default", "local"] {
            let err = Config::load_with(LoadOptions {
                strict: true,
                dir: Some(temp.path().to_owned()),
                environment: Some(name.to_string()),
                ..LoadOptions::default()
            })
            .unwrap_err();
            assert!(matches!(err, ConfigError::StrictModeViolation(_)));
        }
    }

    #[test]
    fn test_strict_mode_requires_environment_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("default.json"), r#"{"a": 1}"#).unwrap();

        let err = Config::load_with(LoadOptions {
            strict: true,
            dir: Some(temp.path().to_owned()),
            environment: Some("production".to_string()),
            ..LoadOptions::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::StrictModeViolation(_)));
    }

    #[test]
    fn test_strict_mode_accepts_complete_setup() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("default.json"), r#"{"a": 1}"#).unwrap();
        std::fs::write(temp.path().join("production.json"), r#"{"a": 2}"#).unwrap();

        let config = Config::load_with(LoadOptions {
            strict: true,
            dir: Some(temp.path().to_owned()),
            environment: Some("production".to_string()),
            ..LoadOptions::default()
        })
        .unwrap();
        assert_eq!(config.get::<i64>("a").unwrap(), 2);
    }

    #[test]
    fn test_explicit_dir_must_exist() {
        let temp = TempDir::new().unwrap();
        let err = Config::load_with(LoadOptions {
            dir: Some(temp.path().join("missing")),
            environment: Some("test".to_string()),
            ..LoadOptions::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::ConfigDirectoryNotFound(_)));
    }

    #[test]
    fn test_key_distance() {
        assert_eq!(key_distance("no.such.key", "no.such.keyy"), 1);
        assert_eq!(key_distance("db.host", "db.port"), 2);
        assert_eq!(key_distance("a", "a"), 0);
        assert_eq!(key_distance("abc", "xbc"), 1);
    }
}
