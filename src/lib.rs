//! Layered configuration resolution.
//!
//! Loads a directory of JSON/YAML/XML config files in precedence order
//! (`default` → `<environment>` → `local` → `local-<environment>` →
//! `custom-environment-variables`), flattens them into one dotted-key
//! namespace with later files overriding earlier keys, resolves
//! environment-variable overlay files, and serves typed lookups:
//!
//! ```no_run
//! use layerconf::Config;
//!
//! # fn main() -> layerconf::Result<()> {
//! let config = Config::load()?;
//! let host: String = config.get("db.host")?;
//! let port: i64 = config.get("db.port")?;
//! let timeout: i64 = config.get_or("db.timeout", 30)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod discovery;
pub mod env;
pub mod error;
pub mod loader;
pub mod merge;
pub mod paths;
pub mod value;

pub use config::{Config, LoadOptions};
pub use error::{ConfigError, Result};
pub use value::{ConfigValue, FromConfigValue, Namespace};
