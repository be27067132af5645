//! Process environment access.
//!
//! Unset and empty variables are both treated as absent, so exporting
//! `LAYERCONF_ENV=""` behaves the same as not exporting it at all.

/// Variable naming the active environment (e.g. `development`, `production`).
pub const ENV_VAR: &str = "LAYERCONF_ENV";

/// Variable overriding the config directory location.
pub const CONFIG_DIR_VAR: &str = "LAYERCONF_CONFIG_DIR";

/// Fallback environment name when [`ENV_VAR`] is unset or empty.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Read an environment variable, treating unset and empty as absent.
pub fn var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

/// The active environment name, defaulting to `development`.
pub fn active_environment() -> String {
    var(ENV_VAR).unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}

/// Explicit config directory override, if set.
pub fn config_dir_override() -> Option<String> {
    var(CONFIG_DIR_VAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_missing_is_absent() {
        assert_eq!(var("LAYERCONF_TEST_NOT_EXPORTED"), None);
    }

    #[test]
    fn test_var_empty_is_absent() {
        // set_var is unsafe since edition 2024; the name is unique to this test
        unsafe { std::env::set_var("LAYERCONF_TEST_EMPTY_VAR", "") };
        assert_eq!(var("LAYERCONF_TEST_EMPTY_VAR"), None);
    }

    #[test]
    fn test_var_set_returns_value() {
        unsafe { std::env::set_var("LAYERCONF_TEST_SET_VAR", "value") };
        assert_eq!(var("LAYERCONF_TEST_SET_VAR"), Some("value".to_string()));
    }
}
