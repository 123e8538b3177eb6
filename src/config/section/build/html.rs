//! `[build.html]` minifier options.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Keep `<!-- comments -->` in the output.
    pub keep_comments: bool,
    /// Keep whitespace between attributes instead of collapsing it.
    pub keep_spaces_between_attributes: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            keep_comments: true,
            keep_spaces_between_attributes: true,
        }
    }
}
