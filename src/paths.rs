//! Config directory resolution.
//!
//! The directory is located by trying, in order:
//! 1. an explicit override (`LAYERCONF_CONFIG_DIR` or a caller-supplied
//!    path); an absolute override must exist and be a directory, a relative
//!    override becomes the subdirectory name probed during the walk-up;
//! 2. a `config` subdirectory of the executable's directory or any of its
//!    ancestors;
//! 3. a `config` subdirectory of the current working directory.

use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Subdirectory name probed when no override is given.
const DEFAULT_SUBDIR: &str = "config";

/// Locate the configuration directory.
///
/// `override_path` is the explicit override (typically
/// [`crate::env::config_dir_override`]); `None` falls back to the
/// executable walk-up and the working directory.
pub fn resolve_config_dir(override_path: Option<&str>) -> Result<PathBuf> {
    let mut suffix = Path::new(DEFAULT_SUBDIR);

    if let Some(overridden) = override_path {
        let path = Path::new(overridden);
        if path.is_absolute() {
            if path.is_dir() {
                return Ok(path.to_owned());
            }
            return Err(ConfigError::ConfigDirectoryNotFound(format!(
                "override {overridden} does not exist or is not a directory"
            )));
        }
        // Relative overrides replace the `config` suffix in the walk-up.
        suffix = path;
    }

    if let Ok(exe) = std::env::current_exe()
        && let Some(exe_dir) = exe.parent()
        && let Some(found) = find_upward(exe_dir, suffix)
    {
        debug!(dir = %found.display(), "config directory found near executable");
        return Ok(found);
    }

    if let Ok(cwd) = std::env::current_dir() {
        let candidate = cwd.join(suffix);
        if candidate.is_dir() {
            debug!(dir = %candidate.display(), "config directory found in working directory");
            return Ok(candidate);
        }
    }

    Err(ConfigError::ConfigDirectoryNotFound(format!(
        "no {} directory near the executable or working directory",
        suffix.display()
    )))
}

/// Walk from `start` up through its ancestors, returning the first
/// `ancestor/suffix` that is a directory.
fn find_upward(start: &Path, suffix: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|ancestor| {
        let candidate = ancestor.join(suffix);
        candidate.is_dir().then_some(candidate)
    })
}
