//! CSS processing configuration.
//!
//! # Example
//!
//! ```toml
//! [build.css]
//! minify = true
//!
//! [build.css.processor]
//! enable = true
//! command = ["npx", "tailwindcss", "-i", "-"]
//! # Source CSS is piped on stdin, expanded CSS is read from stdout.
//! # The input path is also exported as $KILN_INPUT.
//!
//! [build.css.targets]
//! chrome = 80
//! safari = 13
//! ```

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CssConfig {
    /// Minify CSS after prefixing.
    pub minify: bool,
    /// Utility-class processor (e.g. TailwindCSS).
    pub processor: CssProcessorConfig,
    /// Browser versions that decide which vendor prefixes are emitted.
    pub targets: BrowserTargets,
}

impl Default for CssConfig {
    fn default() -> Self {
        Self {
            minify: true,
            processor: CssProcessorConfig::default(),
            targets: BrowserTargets::default(),
        }
    }
}

impl CssConfig {
    /// Validate CSS configuration.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        self.processor.validate(diag);
    }
}

/// External utility-class processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CssProcessorConfig {
    /// Run the processor before prefixing (default: true).
    pub enable: bool,
    /// Processor command (e.g., `["tailwindcss", "-i", "-"]`).
    pub command: Vec<String>,
    /// Suppress processor stderr (default: true).
    pub quiet: bool,
}

impl Default for CssProcessorConfig {
    fn default() -> Self {
        Self {
            enable: true,
            command: vec!["tailwindcss".into(), "-i".into(), "-".into()],
            quiet: true,
        }
    }
}

impl CssProcessorConfig {
    /// Validate CSS processor configuration.
    ///
    /// If enabled, `command` must be non-empty and `command[0]` must be
    /// an installed executable (package runners only get checked themselves).
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }

        let Some(cmd) = self.command.first() else {
            diag.error(
                "build.css.processor.command",
                "build.css.processor.enable is true but build.css.processor.command is empty",
            );
            return;
        };

        if which::which(cmd).is_err() {
            diag.error_with_hint(
                "build.css.processor.command",
                format!("`{cmd}` not found"),
                "install it, update build.css.processor.command, or pass `--css-processor false`",
            );
        }
    }
}

/// Minimum browser major versions.
///
/// Unset browsers are not targeted at all. TOML has no null, so a
/// default browser is dropped by setting it to `0`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BrowserTargets {
    pub android: Option<u32>,
    pub chrome: Option<u32>,
    pub edge: Option<u32>,
    pub firefox: Option<u32>,
    pub ie: Option<u32>,
    pub ios_saf: Option<u32>,
    pub opera: Option<u32>,
    pub safari: Option<u32>,
    pub samsung: Option<u32>,
}

impl Default for BrowserTargets {
    fn default() -> Self {
        Self {
            android: None,
            chrome: Some(80),
            edge: Some(80),
            firefox: Some(78),
            ie: None,
            ios_saf: Some(13),
            opera: None,
            safari: Some(13),
            samsung: None,
        }
    }
}
