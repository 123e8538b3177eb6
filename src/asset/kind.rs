//! Asset kind definitions.

use std::path::Path;

/// How a source file is turned into its output artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// `.html`: minified.
    Html,
    /// `.js`: JSX transpiled to plain calls, preamble prepended.
    Js,
    /// `.css`: utility expansion, vendor prefixes, minified.
    Css,
    /// Anything else: copied byte for byte.
    Other,
}

impl AssetKind {
    /// Pick the kind from the file name suffix.
    ///
    /// Matching is exact and case-sensitive, so `a.HTML` and `a.htm` are
    /// [`AssetKind::Other`]. File contents are never inspected.
    pub fn from_path(path: &Path) -> Self {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return Self::Other;
        };

        if name.ends_with(".html") {
            Self::Html
        } else if name.ends_with(".js") {
            Self::Js
        } else if name.ends_with(".css") {
            Self::Css
        } else {
            Self::Other
        }
    }

    /// Short name used as log prefix.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Js => "js",
            Self::Css => "css",
            Self::Other => "copy",
        }
    }
}
