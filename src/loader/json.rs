//! JSON config loading.

use super::flatten::flatten_document;
use super::{MissingVarPolicy, read_if_exists, resolve_overlay};
use crate::error::{ConfigError, Result};
use crate::value::Namespace;
use serde_json::Value;
use std::path::Path;

/// Load a JSON config file into `out`. A missing file is a no-op.
pub fn load_file(path: &Path, out: &mut Namespace) -> Result<()> {
    let Some(content) = read_if_exists(path)? else {
        return Ok(());
    };
    let doc: Value =
        serde_json::from_str(&content).map_err(|e| ConfigError::malformed(path, e))?;
    flatten_document(path, &doc, out)
}

/// Load a JSON environment-overlay file into `out`.
///
/// Every string leaf names an environment variable; an unset or empty
/// variable is fatal (`MissingEnvironmentVariable`), and a non-string leaf
/// is rejected (`UnsupportedValueType`).
pub fn load_env_file(path: &Path, out: &mut Namespace) -> Result<()> {
    let mut scratch = Namespace::new();
    load_file(path, &mut scratch)?;
    resolve_overlay(path, scratch, MissingVarPolicy::Fail, out)
}
