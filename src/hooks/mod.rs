//! External tool integration.
//!
//! - `css`: utility-class processor (TailwindCSS, etc.) run as a command
//!
//! Commands see `$KILN_*` environment variables, and the same names are
//! substituted inside command arguments.

pub mod css;

use crate::config::SiteConfig;
use std::path::Path;

/// Build `$KILN_*` variables for one processed file.
pub fn build_kiln_vars(config: &SiteConfig, input: &Path) -> Vec<(String, String)> {
    vec![
        ("KILN_ROOT".into(), config.get_root().display().to_string()),
        (
            "KILN_SOURCE_DIR".into(),
            config.build.source.display().to_string(),
        ),
        (
            "KILN_OUTPUT_DIR".into(),
            config.build.output.display().to_string(),
        ),
        ("KILN_INPUT".into(), input.display().to_string()),
    ]
}

/// Resolve `$KILN_*` variables in command arguments
///
/// Longer names are replaced first so `$KILN_INPUT` never eats part of a
/// longer variable sharing its prefix.
pub fn resolve_args(args: &[String], vars: &[(String, String)]) -> Vec<String> {
    let mut ordered: Vec<_> = vars.iter().collect();
    ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    args.iter()
        .map(|arg| {
            let mut result = arg.clone();
            for (key, value) in &ordered {
                result = result.replace(&format!("${key}"), value);
            }
            result
        })
        .collect()
}
