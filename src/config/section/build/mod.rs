//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! source = "src"      # Source tree (relative to project root)
//! output = "dist"     # Mirrored output tree (relative to project root)
//! clean = false       # Remove the output tree before building
//!
//! [build.html]
//! keep_comments = true
//!
//! [build.js]
//! pragma = "___CreateElement___"
//!
//! [build.css.processor]
//! enable = true
//! ```
//!
//! See submodules for detailed options: [`html`], [`js`], [`css`].

mod css;
mod html;
mod js;

pub use css::{BrowserTargets, CssConfig};
pub use html::HtmlConfig;
pub use js::{DEFAULT_PRAGMA, JsConfig};

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Source root.
    pub source: PathBuf,

    /// Output root.
    pub output: PathBuf,

    /// Remove the output root before building, so files whose source was
    /// deleted don't linger.
    pub clean: bool,

    /// HTML minifier settings.
    pub html: HtmlConfig,

    /// JSX transform settings.
    pub js: JsConfig,

    /// CSS processing settings.
    pub css: CssConfig,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            source: "src".into(),
            output: "dist".into(),
            clean: false,
            html: HtmlConfig::default(),
            js: JsConfig::default(),
            css: CssConfig::default(),
        }
    }
}

impl BuildSectionConfig {
    /// Validate build configuration.
    ///
    /// Expects `source` and `output` to be already resolved against the root.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.source.is_dir() {
            diag.error(
                "build.source",
                format!("source directory `{}` not found", self.source.display()),
            );
        }

        if self.output.starts_with(&self.source) {
            diag.error_with_hint(
                "build.output",
                format!(
                    "output `{}` is inside source `{}`",
                    self.output.display(),
                    self.source.display()
                ),
                "use sibling directories, e.g. `src` and `dist`",
            );
        } else if self.source.starts_with(&self.output) {
            diag.error_with_hint(
                "build.output",
                format!(
                    "source `{}` is inside output `{}`",
                    self.source.display(),
                    self.output.display()
                ),
                "use sibling directories, e.g. `src` and `dist`",
            );
        }

        self.js.validate(diag);
        self.css.validate(diag);
    }
}
