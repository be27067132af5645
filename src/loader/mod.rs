//! Format loaders.
//!
//! Each loader exposes `load_file` (literal values) and `load_env_file`
//! (environment overlay: every string leaf names a variable whose runtime
//! value is stored instead). Missing files are a no-op since callers probe
//! speculatively; malformed files abort the load.

pub mod flatten;
pub mod json;
pub mod xml;
pub mod yaml;

use crate::error::{ConfigError, Result};
use crate::value::{ConfigValue, Namespace};
use std::path::Path;
use tracing::warn;

/// Overlay reaction to an unset/empty variable or a non-string leaf.
///
/// The JSON loader fails hard; the YAML and XML loaders log and skip,
/// matching their historical behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MissingVarPolicy {
    Fail,
    Skip,
}

/// Read a file if it exists. A present but unreadable file is malformed.
pub(crate) fn read_if_exists(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    std::fs::read_to_string(path)
        .map(Some)
        .map_err(|e| ConfigError::malformed(path, e))
}

/// Substitute environment-variable values for the string leaves of a
/// flattened overlay file.
///
/// `scratch` holds the file's own flattened leaves; only resolved values
/// ever reach `out`, never the literals.
pub(crate) fn resolve_overlay(
    path: &Path,
    scratch: Namespace,
    policy: MissingVarPolicy,
    out: &mut Namespace,
) -> Result<()> {
    for (key, value) in scratch {
        let name = match value {
            ConfigValue::String(name) => name,
            other => match policy {
                MissingVarPolicy::Fail => {
                    return Err(ConfigError::UnsupportedValueType {
                        path: path.to_owned(),
                        key,
                    });
                }
                MissingVarPolicy::Skip => {
                    warn!(
                        key = %key,
                        kind = other.kind(),
                        "overlay leaf is not a variable name, skipping"
                    );
                    continue;
                }
            },
        };

        match crate::env::var(&name) {
            Some(resolved) => {
                out.insert(key, ConfigValue::String(resolved));
            }
            None => match policy {
                MissingVarPolicy::Fail => {
                    return Err(ConfigError::MissingEnvironmentVariable(name));
                }
                MissingVarPolicy::Skip => {
                    warn!(key = %key, variable = %name, "environment variable not set, skipping");
                }
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_overlay_stores_resolved_value_not_literal() {
        unsafe { std::env::set_var("LAYERCONF_TEST_OVERLAY_DB", "db.internal") };
        let mut scratch = Namespace::new();
        scratch.insert(
            "db.host".to_string(),
            ConfigValue::String("LAYERCONF_TEST_OVERLAY_DB".to_string()),
        );

        let mut out = Namespace::new();
        resolve_overlay(
            Path::new("custom-environment-variables.json"),
            scratch,
            MissingVarPolicy::Fail,
            &mut out,
        )
        .unwrap();

        assert_eq!(
            out.get("db.host"),
            Some(&ConfigValue::String("db.internal".to_string()))
        );
    }

    #[test]
    fn test_resolve_overlay_fail_policy_on_missing_variable() {
        let mut scratch = Namespace::new();
        scratch.insert(
            "secret".to_string(),
            ConfigValue::String("LAYERCONF_TEST_OVERLAY_UNSET".to_string()),
        );

        let mut out = Namespace::new();
        let err = resolve_overlay(
            Path::new("custom-environment-variables.json"),
            scratch,
            MissingVarPolicy::Fail,
            &mut out,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::MissingEnvironmentVariable(name) if name == "LAYERCONF_TEST_OVERLAY_UNSET"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_resolve_overlay_skip_policy_drops_key() {
        let mut scratch = Namespace::new();
        scratch.insert(
            "secret".to_string(),
            ConfigValue::String("LAYERCONF_TEST_OVERLAY_ALSO_UNSET".to_string()),
        );
        scratch.insert("count".to_string(), ConfigValue::Int(3));

        let mut out = Namespace::new();
        resolve_overlay(
            Path::new("environment.yaml"),
            scratch,
            MissingVarPolicy::Skip,
            &mut out,
        )
        .unwrap();

        // Unresolvable and non-string leaves are both dropped, never stored.
        assert!(out.is_empty());
    }
}
