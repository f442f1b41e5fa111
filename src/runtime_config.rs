//! # Runtime Configuration Module
//!
//! Settings that shape view resolution, loaded from environment variables or
//! a YAML file.
//!
//! ## Environment Variables
//!
//! ### `BRRTMVC_VIEW_PREFIX` / `BRRTMVC_VIEW_SUFFIX`
//!
//! Wrapped around a logical view name to form the template location. With
//! prefix `pages/` and suffix `.html`, the view name `greeting` renders
//! `pages/greeting.html`.
//!
//! Default: `""` and `".html"`
//!
//! ### `BRRTMVC_REDIRECT_PREFIX`
//!
//! View names starting with this prefix become redirects to the remainder.
//!
//! Default: `redirect:`
//!
//! ### `BRRTMVC_TEMPLATE_DIR`
//!
//! Directory the template renderer loads from.
//!
//! Default: `templates`
//!
//! ## YAML
//!
//! The same keys in snake case; missing keys take their defaults:
//!
//! ```yaml
//! view_prefix: "pages/"
//! view_suffix: ".html"
//! redirect_prefix: "redirect:"
//! template_dir: "./templates"
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use brrtmvc::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Templates from: {}", config.template_dir.display());
//! ```

use crate::view::DEFAULT_REDIRECT_PREFIX;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// View-resolution settings.
///
/// Load this at startup using [`RuntimeConfig::from_env()`] or
/// [`RuntimeConfig::from_yaml_file()`] and hand it to the dispatcher builder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Prepended to view names to form template locations (default: empty)
    pub view_prefix: String,
    /// Appended to view names to form template locations (default: `.html`)
    pub view_suffix: String,
    /// Marks a view name as a redirect (default: `redirect:`)
    pub redirect_prefix: String,
    /// Template root for the renderer (default: `templates`)
    pub template_dir: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            view_prefix: String::new(),
            view_suffix: ".html".to_string(),
            redirect_prefix: DEFAULT_REDIRECT_PREFIX.to_string(),
            template_dir: PathBuf::from("templates"),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML for
    /// this structure.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid YAML for this structure.
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        // An empty document deserializes as unit, not as a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            view_prefix: lookup("BRRTMVC_VIEW_PREFIX").unwrap_or(defaults.view_prefix),
            view_suffix: lookup("BRRTMVC_VIEW_SUFFIX").unwrap_or(defaults.view_suffix),
            redirect_prefix: lookup("BRRTMVC_REDIRECT_PREFIX")
                .filter(|p| !p.is_empty())
                .unwrap_or(defaults.redirect_prefix),
            template_dir: lookup("BRRTMVC_TEMPLATE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.template_dir),
        }
    }
}
