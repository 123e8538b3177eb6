//! CSS post-processing.
//!
//! Two passes over each stylesheet:
//! 1. utility-class expansion by a [`UtilityProcessor`], then vendor
//!    prefixing for the configured browser targets
//! 2. minification of the expanded, prefixed text
//!
//! Prefixing and minification use lightningcss.

use std::path::Path;

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};

use crate::config::{BrowserTargets, CssConfig};

use super::TransformError;

/// Expands utility classes (`@tailwind`, `@apply`, ...) into plain CSS.
pub trait UtilityProcessor {
    /// Expand `source`, read from `path`.
    fn expand(&self, source: &str, path: &Path) -> Result<String, TransformError>;
}

/// Processor that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUtilities;

impl UtilityProcessor for NoUtilities {
    fn expand(&self, source: &str, _path: &Path) -> Result<String, TransformError> {
        Ok(source.to_owned())
    }
}

/// Run both passes over one stylesheet.
pub fn transform_css(
    source: &str,
    path: &Path,
    processor: &dyn UtilityProcessor,
    config: &CssConfig,
) -> Result<String, TransformError> {
    let targets = to_targets(&config.targets);

    let expanded = processor.expand(source, path)?;
    let prefixed = autoprefix(&expanded, path, targets)?;

    if config.minify {
        minify_css(&prefixed, path, targets)
    } else {
        Ok(prefixed)
    }
}

/// Add vendor prefixes needed by `targets`, keeping readable formatting.
pub fn autoprefix(source: &str, path: &Path, targets: Targets) -> Result<String, TransformError> {
    process(source, path, targets, false)
}

/// Minify CSS, keeping the prefixes `targets` needs.
pub fn minify_css(source: &str, path: &Path, targets: Targets) -> Result<String, TransformError> {
    process(source, path, targets, true)
}

/// Parse, run the declaration handlers for `targets`, print.
fn process(
    source: &str,
    path: &Path,
    targets: Targets,
    minify: bool,
) -> Result<String, TransformError> {
    let options = ParserOptions {
        filename: path.display().to_string(),
        ..ParserOptions::default()
    };
    let mut stylesheet =
        StyleSheet::parse(source, options).map_err(|e| TransformError::css(path, e))?;

    stylesheet
        .minify(MinifyOptions {
            targets,
            ..MinifyOptions::default()
        })
        .map_err(|e| TransformError::css(path, e))?;

    let result = stylesheet
        .to_css(PrinterOptions {
            minify,
            targets,
            ..PrinterOptions::default()
        })
        .map_err(|e| TransformError::css(path, e))?;

    Ok(result.code)
}

/// Convert configured major versions into lightningcss targets.
///
/// lightningcss packs versions as `major << 16 | minor << 8 | patch`.
pub fn to_targets(targets: &BrowserTargets) -> Targets {
    let version = |v: Option<u32>| v.filter(|major| *major > 0).map(|major| major << 16);

    let browsers = Browsers {
        android: version(targets.android),
        chrome: version(targets.chrome),
        edge: version(targets.edge),
        firefox: version(targets.firefox),
        ie: version(targets.ie),
        ios_saf: version(targets.ios_saf),
        opera: version(targets.opera),
        safari: version(targets.safari),
        samsung: version(targets.samsung),
    };

    Targets {
        browsers: Some(browsers),
        ..Targets::default()
    }
}
