//! XML config loading.
//!
//! The document's root element is a wrapper; its children form the top
//! level of the namespace. Repeated sibling elements with the same name
//! collapse into one `StringList` stored at the path of their container
//! (the repeated element name is dropped). Element text is typed by
//! inspection: `true`/`false`, integer and decimal literals, empty text as
//! null, anything else as a string.

use super::{MissingVarPolicy, read_if_exists, resolve_overlay};
use crate::error::{ConfigError, Result};
use crate::value::{ConfigValue, Namespace};
use indexmap::IndexMap;
use std::path::Path;

/// Load an XML config file into `out`. A missing file is a no-op.
pub fn load_file(path: &Path, out: &mut Namespace) -> Result<()> {
    let Some(content) = read_if_exists(path)? else {
        return Ok(());
    };
    let doc = roxmltree::Document::parse(&content).map_err(|e| ConfigError::malformed(path, e))?;

    // Leaf text grouped by path; repeated siblings accumulate per key.
    let mut flat: IndexMap<String, Vec<String>> = IndexMap::new();
    flatten_element(doc.root_element(), "", &mut flat);

    for (key, mut values) in flat {
        if values.len() > 1 {
            out.insert(list_key(&key), ConfigValue::StringList(values));
        } else if let Some(text) = values.pop() {
            out.insert(key, parse_text(&text));
        }
    }
    Ok(())
}

/// Load an XML environment-overlay file into `out`.
///
/// Like the YAML overlay, an unset or empty variable only logs a warning
/// and the key is skipped; non-string leaves are skipped as well.
pub fn load_env_file(path: &Path, out: &mut Namespace) -> Result<()> {
    let mut scratch = Namespace::new();
    load_file(path, &mut scratch)?;
    resolve_overlay(path, scratch, MissingVarPolicy::Skip, out)
}

fn flatten_element(node: roxmltree::Node<'_, '_>, prefix: &str, flat: &mut IndexMap<String, Vec<String>>) {
    for child in node.children().filter(|c| c.is_element()) {
        let name = child.tag_name().name();
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };
        if child.children().any(|c| c.is_element()) {
            flatten_element(child, &path, flat);
        } else {
            let text = child.text().unwrap_or("").trim().to_string();
            flat.entry(path).or_default().push(text);
        }
    }
}

/// Drop the repeated element's own name so `<roles><role>..</role>…` lands
/// at `roles`, not `roles.role`.
fn list_key(key: &str) -> String {
    match key.rfind('.') {
        Some(last_dot) => key[..last_dot].to_string(),
        None => key.to_string(),
    }
}

/// Type an element's text content.
fn parse_text(text: &str) -> ConfigValue {
    if text.is_empty() {
        return ConfigValue::Null;
    }
    if text == "true" || text == "false" {
        return ConfigValue::Bool(text == "true");
    }
    if text.contains('.') {
        if let Ok(d) = text.parse::<f64>() {
            let narrowed = d as f32;
            return if f64::from(narrowed) == d {
                ConfigValue::Float(narrowed)
            } else {
                ConfigValue::Double(d)
            };
        }
    } else if let Ok(i) = text.parse::<i64>() {
        return ConfigValue::Int(i);
    }
    ConfigValue::String(text.to_string())
}
