//! `ottomap.toml` configuration.
//!
//! Every key is optional; a missing file means defaults throughout.
//!
//! # Example
//!
//! ```toml
//! [parse]
//! scrub_non_printable = true
//! sort_sections = false
//!
//! [dump]
//! separate_units = false
//! ```

use std::path::Path;

use ottomap_core::ParseOptions;
use serde::Deserialize;
use tracing::debug;

/// Looked up in the working directory when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "ottomap.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub parse: ParseOptions,
    pub dump: DumpOptions,
}

/// `[dump]` section: layout of the `sections` debug dump.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DumpOptions {
    /// Print a blank line between units.
    pub separate_units: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        DumpOptions {
            separate_units: true,
        }
    }
}

/// Load `explicit`, or `ottomap.toml` if it exists, or the defaults.
pub(crate) fn load(explicit: Option<&Path>) -> Result<Config, String> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let path = Path::new(DEFAULT_CONFIG_FILE);
    if path.is_file() {
        read_config(path)
    } else {
        debug!("no {} in working directory, using defaults", DEFAULT_CONFIG_FILE);
        Ok(Config::default())
    }
}

/// Read and parse a config file.
pub(crate) fn read_config(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}
