//! Canonical configuration values and type-safe casts.
//!
//! Every loader normalizes its leaves into [`ConfigValue`]; the closed set of
//! variants is the whole contract between the format loaders and the lookup
//! facade. Typed lookups go through [`FromConfigValue`], which either
//! converts the stored variant or reports the stored kind for a
//! `TypeMismatch` diagnostic.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// The flat namespace of dotted keys built by the merge engine.
///
/// Insertion-ordered so that exploded array entries (`roles.0`, `roles.1`)
/// aggregate in document order deterministically.
pub type Namespace = IndexMap<String, ConfigValue>;

/// A single configuration value, normalized from any source format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Explicit null (JSON `null`, YAML `~`, empty XML element).
    Null,
    Bool(bool),
    Int(i64),
    /// Narrow float, produced when an XML literal round-trips at f32.
    Float(f32),
    Double(f64),
    String(String),
    /// A list of pure scalars, each rendered to its canonical text.
    StringList(Vec<String>),
}

impl ConfigValue {
    /// Kind name used in `TypeMismatch` diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "bool",
            ConfigValue::Int(_) => "int",
            ConfigValue::Float(_) => "float",
            ConfigValue::Double(_) => "double",
            ConfigValue::String(_) => "string",
            ConfigValue::StringList(_) => "string list",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Canonical text form: integers without a decimal point, floats with the
    /// fewest digits that round-trip, lists bracketed with quoted elements.
    pub fn render(&self) -> String {
        match self {
            ConfigValue::Null => "null".to_string(),
            ConfigValue::Bool(b) => b.to_string(),
            ConfigValue::Int(i) => i.to_string(),
            ConfigValue::Float(f) => f.to_string(),
            ConfigValue::Double(d) => d.to_string(),
            ConfigValue::String(s) => s.clone(),
            ConfigValue::StringList(items) => {
                let quoted: Vec<String> = items.iter().map(|s| format!("\"{s}\"")).collect();
                format!("[{}]", quoted.join(", "))
            }
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Conversion from a stored [`ConfigValue`] to a concrete Rust type.
///
/// Numeric variants cross-cast; any variant renders into `String`; a single
/// scalar wraps into a one-element `Vec<String>`. `Null` converts to nothing.
pub trait FromConfigValue: Sized {
    /// Type name used in `TypeMismatch` diagnostics.
    const EXPECTED: &'static str;

    fn from_config_value(value: &ConfigValue) -> Option<Self>;
}

impl FromConfigValue for i64 {
    const EXPECTED: &'static str = "int";

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Int(i) => Some(*i),
            ConfigValue::Float(f) => Some(*f as i64),
            ConfigValue::Double(d) => Some(*d as i64),
            _ => None,
        }
    }
}

impl FromConfigValue for i32 {
    const EXPECTED: &'static str = "int";

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        i64::from_config_value(value).and_then(|i| i32::try_from(i).ok())
    }
}

impl FromConfigValue for f32 {
    const EXPECTED: &'static str = "float";

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Int(i) => Some(*i as f32),
            ConfigValue::Float(f) => Some(*f),
            ConfigValue::Double(d) => Some(*d as f32),
            _ => None,
        }
    }
}

impl FromConfigValue for f64 {
    const EXPECTED: &'static str = "double";

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Int(i) => Some(*i as f64),
            ConfigValue::Float(f) => Some(f64::from(*f)),
            ConfigValue::Double(d) => Some(*d),
            _ => None,
        }
    }
}

impl FromConfigValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromConfigValue for String {
    const EXPECTED: &'static str = "string";

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Null => None,
            other => Some(other.render()),
        }
    }
}

impl FromConfigValue for Vec<String> {
    const EXPECTED: &'static str = "string list";

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Null => None,
            ConfigValue::StringList(items) => Some(items.clone()),
            other => Some(vec![other.render()]),
        }
    }
}
