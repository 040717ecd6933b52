//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find a celltree.toml, and if present we load settings from there.
//! This provides the heading depth cap, output format, and default log level.

use crate::error::{Error, Result};
use facet::Facet;
use std::fs;
use std::io;
use std::path::Path;

/// File looked for in the working directory when no path is given.
pub const CONFIG_FILE: &str = "celltree.toml";

#[derive(Facet, Clone, Debug)]
/// User preferences loaded from celltree.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 6)]
    /// Deepest heading level an increment may produce.
    pub max_heading_depth: usize,
    #[facet(default = false)]
    /// Emit JSON instead of text unless overridden on the command line.
    pub json: bool,
    #[facet(default = "warn".to_string())]
    /// Log filter used when neither `RUST_LOG` nor a verbosity flag is set.
    pub log_level: String,
}

impl Config {
    /// Parse configuration from TOML text; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this shape.
    pub fn from_toml(contents: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::from_toml(""),
            Err(e) => Err(e.into()),
        }
    }

    /// Load configuration from celltree.toml if present.
    ///
    /// # Errors
    ///
    /// Returns an error if celltree.toml exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
