//! Shared document flattening and scalar normalization.
//!
//! JSON documents are flattened directly; YAML documents are parsed into
//! `serde_json::Value` first so both formats share this one traversal.
//! Depth-first: object children append `.child` to the accumulated path,
//! scalar leaves write the normalized value, and sequences become either a
//! single `StringList` (all elements scalar) or indexed child paths.

use crate::error::{ConfigError, Result};
use crate::value::{ConfigValue, Namespace};
use serde_json::Value;
use std::path::Path;

/// Normalize one scalar leaf into its canonical value.
///
/// Returns `None` for structured nodes (objects, arrays); the traversal
/// handles those before the normalizer is consulted.
pub fn normalize_scalar(value: &Value) -> Option<ConfigValue> {
    match value {
        Value::Null => Some(ConfigValue::Null),
        Value::Bool(b) => Some(ConfigValue::Bool(*b)),
        Value::Number(n) => Some(normalize_number(n)),
        Value::String(s) => Some(ConfigValue::String(s.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Integral numbers become `Int`; everything else keeps native f64 width.
fn normalize_number(n: &serde_json::Number) -> ConfigValue {
    if let Some(i) = n.as_i64() {
        ConfigValue::Int(i)
    } else {
        ConfigValue::Double(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Normalize a sequence of scalar leaves into a `StringList`.
///
/// An empty sequence is an empty list; any structured element fails with
/// `UnsupportedValueType`.
pub fn normalize_sequence(path: &Path, key: &str, items: &[Value]) -> Result<ConfigValue> {
    let mut rendered = Vec::with_capacity(items.len());
    for item in items {
        match normalize_scalar(item) {
            Some(value) => rendered.push(value.render()),
            None => {
                return Err(ConfigError::UnsupportedValueType {
                    path: path.to_owned(),
                    key: key.to_string(),
                });
            }
        }
    }
    Ok(ConfigValue::StringList(rendered))
}

/// Flatten a parsed document into dotted keys written into `out`.
///
/// An empty (null) document contributes nothing.
pub fn flatten_document(path: &Path, doc: &Value, out: &mut Namespace) -> Result<()> {
    if doc.is_null() {
        return Ok(());
    }
    flatten_node(path, doc, String::new(), out)
}

fn flatten_node(path: &Path, node: &Value, prefix: String, out: &mut Namespace) -> Result<()> {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                let child_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_node(path, child, child_prefix, out)?;
            }
        }
        Value::Array(items) => {
            if items.iter().all(|item| normalize_scalar(item).is_some()) {
                let value = normalize_sequence(path, &prefix, items)?;
                out.insert(prefix, value);
            } else {
                for (index, item) in items.iter().enumerate() {
                    flatten_node(path, item, format!("{prefix}.{index}"), out)?;
                }
            }
        }
        scalar => {
            let value = normalize_scalar(scalar).ok_or_else(|| {
                ConfigError::UnsupportedValueType {
                    path: path.to_owned(),
                    key: prefix.clone(),
                }
            })?;
            out.insert(prefix, value);
        }
    }
    Ok(())
}
