//! Config file discovery and precedence ordering.
//!
//! Enumerates the regular files directly inside the config directory,
//! classifies them by extension and role, and orders them so that later
//! files override earlier ones during the merge:
//! `default` → `<active-env>` → `local` → `local-<active-env>` →
//! `custom-environment-variables`, with unlisted stems after all of those,
//! alphabetically.

use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source format of a config file, classified by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
    Xml,
}

impl FileFormat {
    /// Classify a file extension; unknown extensions are ignored entirely.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "json" => Some(FileFormat::Json),
            "yaml" | "yml" => Some(FileFormat::Yaml),
            "xml" => Some(FileFormat::Xml),
            _ => None,
        }
    }
}

/// A discovered config file, ready for the merge engine.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub format: FileFormat,
    /// File name without extension; drives precedence ranking.
    pub stem: String,
    /// True when the file's leaves name environment variables rather than
    /// holding literal values.
    pub env_overlay: bool,
}

/// Enumerate and order the files to load from `dir`.
///
/// Non-recursive; non-regular files and unknown extensions are skipped.
pub fn discover(dir: &Path, active_env: &str) -> Result<Vec<ConfigFile>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        ConfigError::ConfigDirectoryNotFound(format!("cannot read {}: {e}", dir.display()))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            ConfigError::ConfigDirectoryNotFound(format!("cannot read {}: {e}", dir.display()))
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(format) = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(FileFormat::from_extension)
        else {
            continue;
        };
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let env_overlay = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.contains("environment"));

        files.push(ConfigFile {
            stem: stem.to_string(),
            format,
            env_overlay,
            path,
        });
    }

    files.sort_by(|a, b| {
        precedence_rank(&a.stem, active_env)
            .cmp(&precedence_rank(&b.stem, active_env))
            .then_with(|| a.path.file_name().cmp(&b.path.file_name()))
    });

    debug!(
        dir = %dir.display(),
        count = files.len(),
        "discovered config files"
    );
    Ok(files)
}

/// Position of a stem in the precedence list; unlisted stems sort last.
fn precedence_rank(stem: &str, active_env: &str) -> usize {
    let local_env = format!("local-{active_env}");
    let order = [
        "default",
        active_env,
        "local",
        local_env.as_str(),
        "custom-environment-variables",
    ];
    order
        .iter()
        .position(|candidate| *candidate == stem)
        .unwrap_or(order.len())
}
