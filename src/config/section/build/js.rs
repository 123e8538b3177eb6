//! `[build.js]` JSX transform options.
//!
//! # Example
//!
//! ```toml
//! [build.js]
//! pragma = "h"        # call target for JSX elements
//! preamble = false    # `h` comes from elsewhere, don't inline the helper
//! ```

use crate::config::ConfigDiagnostics;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Default call target for JSX elements, defined by the inlined preamble.
pub const DEFAULT_PRAGMA: &str = "___CreateElement___";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JsConfig {
    /// Function that JSX elements are rewritten to call.
    pub pragma: String,
    /// Prepend the element-creation helper, named after `pragma`.
    pub preamble: bool,
}

impl Default for JsConfig {
    fn default() -> Self {
        Self {
            pragma: DEFAULT_PRAGMA.into(),
            preamble: true,
        }
    }
}

impl JsConfig {
    /// The pragma must be a plain identifier when the preamble defines it.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        static IDENT: OnceLock<Regex> = OnceLock::new();
        let ident = IDENT.get_or_init(|| {
            Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid identifier regex")
        });

        if self.pragma.is_empty() {
            diag.error("build.js.pragma", "pragma must not be empty");
        } else if self.preamble && !ident.is_match(&self.pragma) {
            diag.error_with_hint(
                "build.js.pragma",
                format!("`{}` is not a valid function name", self.pragma),
                "use an identifier, or set build.js.preamble = false for member expressions like `React.createElement`",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_js_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.js.pragma, DEFAULT_PRAGMA);
        assert!(config.build.js.preamble);
    }

    #[test]
    fn test_validate_pragma() {
        let mut diag = ConfigDiagnostics::new();
        JsConfig::default().validate(&mut diag);
        assert!(!diag.has_errors());

        let member = JsConfig {
            pragma: "React.createElement".into(),
            preamble: true,
        };
        member.validate(&mut diag);
        assert!(diag.has_errors());

        let mut diag = ConfigDiagnostics::new();
        let member = JsConfig {
            pragma: "React.createElement".into(),
            preamble: false,
        };
        member.validate(&mut diag);
        assert!(!diag.has_errors());
    }
}
