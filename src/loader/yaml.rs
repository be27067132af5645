//! YAML config loading.
//!
//! YAML documents are parsed into `serde_json::Value` so they share the
//! JSON flattening path; YAML-only syntax (anchors, merges) is resolved by
//! the parser before flattening.

use super::flatten::flatten_document;
use super::{MissingVarPolicy, read_if_exists, resolve_overlay};
use crate::error::{ConfigError, Result};
use crate::value::Namespace;
use serde_json::Value;
use std::path::Path;

/// Load a YAML config file into `out`. A missing file is a no-op.
pub fn load_file(path: &Path, out: &mut Namespace) -> Result<()> {
    let Some(content) = read_if_exists(path)? else {
        return Ok(());
    };
    let doc: Value =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::malformed(path, e))?;
    flatten_document(path, &doc, out)
}

/// Load a YAML environment-overlay file into `out`.
///
/// Unlike the JSON overlay, an unset or empty variable only logs a warning
/// and the key is skipped; non-string leaves are skipped as well.
pub fn load_env_file(path: &Path, out: &mut Namespace) -> Result<()> {
    let mut scratch = Namespace::new();
    load_file(path, &mut scratch)?;
    resolve_overlay(path, scratch, MissingVarPolicy::Skip, out)
}
