//! Merge engine: fold ordered files through their loaders into one namespace.
//!
//! Later files overwrite earlier ones at leaf-key granularity: a later
//! file's `db.port` never disturbs an earlier file's `db.host`.

use crate::discovery::{ConfigFile, FileFormat};
use crate::error::{ConfigError, Result};
use crate::loader::{json, xml, yaml};
use crate::value::Namespace;
use std::path::Path;
use tracing::debug;

/// Load every discovered file, in order, into `out`.
///
/// In strict mode an empty result after all files is fatal
/// (`EmptyConfiguration`).
pub fn merge_files(
    dir: &Path,
    files: &[ConfigFile],
    strict: bool,
    out: &mut Namespace,
) -> Result<()> {
    for file in files {
        debug!(
            path = %file.path.display(),
            overlay = file.env_overlay,
            "loading config file"
        );
        match (file.format, file.env_overlay) {
            (FileFormat::Json, false) => json::load_file(&file.path, out)?,
            (FileFormat::Json, true) => json::load_env_file(&file.path, out)?,
            (FileFormat::Yaml, false) => yaml::load_file(&file.path, out)?,
            (FileFormat::Yaml, true) => yaml::load_env_file(&file.path, out)?,
            (FileFormat::Xml, false) => xml::load_file(&file.path, out)?,
            (FileFormat::Xml, true) => xml::load_env_file(&file.path, out)?,
        }
    }

    if strict && out.is_empty() {
        return Err(ConfigError::EmptyConfiguration {
            dir: dir.to_owned(),
        });
    }
    Ok(())
}
