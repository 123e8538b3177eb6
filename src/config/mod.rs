//! Project configuration management for `kiln.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   └── build/     # [build] and sub-sections (html, js, css)
//! ├── error.rs       # ConfigError, ConfigDiagnostics
//! ├── util.rs        # Config file discovery
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! The config file is optional. Without one every setting takes its
//! default and the project root is the current directory, so a bare
//! `kiln` builds `./src` into `./dist`.

mod error;
pub mod section;
mod util;

pub use error::{ConfigDiagnostics, ConfigError};
pub use section::{
    BrowserTargets, BuildSectionConfig, CssConfig, DEFAULT_PRAGMA, HtmlConfig, JsConfig,
};

use crate::{cli::Cli, debug, log};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use util::{find_config_file, normalize_lexically};

/// Default config file name, searched upward from the current directory.
pub const CONFIG_FILE: &str = "kiln.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing kiln.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Project root directory - parent of config file, or cwd (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildSectionConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. An explicit `--config`
    /// that doesn't exist is an error; a missing default file is not.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let name = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        let mut config = match find_config_file(&name, &cwd) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                debug!("config"; "using {}", path.display());
                config
            }
            None if cli.config.is_some() => return Err(ConfigError::NotFound(name).into()),
            None => Self {
                root: cwd,
                ..Self::default()
            },
        };

        config.apply_cli(cli);
        config.normalize_paths();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Get path relative to the project root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply CLI overrides on top of file values.
    fn apply_cli(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        Self::update_option(&mut self.build.source, cli.source.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        Self::update_option(
            &mut self.build.css.processor.enable,
            cli.css_processor.as_ref(),
        );
        // --clean only ever turns cleaning on
        self.build.clean |= cli.clean;
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Resolve `source` and `output` against the root.
    ///
    /// Absolute paths are kept, then `.` and `..` are resolved so overlap
    /// checks compare like with like.
    pub fn normalize_paths(&mut self) {
        self.build.source = normalize_lexically(&self.root.join(&self.build.source));
        self.build.output = normalize_lexically(&self.root.join(&self.build.output));
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate all sections, reporting every problem at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.build.validate(&mut diag);
        diag.into_result()
    }
}

/// Parse a config snippet, failing on unknown fields.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Config rooted at `root` with the default `src`/`dist` layout resolved.
///
/// The utility processor is off so tests don't depend on `tailwindcss`.
#[cfg(test)]
pub fn test_config_at(root: &Path) -> SiteConfig {
    let mut config = SiteConfig {
        root: root.to_path_buf(),
        ..SiteConfig::default()
    };
    config.build.css.processor.enable = false;
    config.normalize_paths();
    config
}

// ============================================================================
// tests
// ============================================================================
