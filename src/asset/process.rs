//! Per-file processing with side effects (read, transform, write).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::SiteConfig;
use crate::debug;

use super::css::{UtilityProcessor, transform_css};
use super::html::minify_html;
use super::js::transform_jsx;
use super::AssetKind;

/// Transformers bound to one build's configuration.
pub struct AssetPipeline<'a> {
    config: &'a SiteConfig,
    utilities: Box<dyn UtilityProcessor + 'a>,
}

impl<'a> AssetPipeline<'a> {
    /// Pipeline whose CSS utility pass is the configured processor command.
    pub fn new(config: &'a SiteConfig) -> Self {
        Self::with_utilities(config, crate::hooks::css::utility_processor(config))
    }

    /// Pipeline with an explicit utility-class processor.
    pub fn with_utilities(
        config: &'a SiteConfig,
        utilities: Box<dyn UtilityProcessor + 'a>,
    ) -> Self {
        Self { config, utilities }
    }

    /// Pipeline that skips utility expansion.
    #[cfg(test)]
    pub fn without_utilities(config: &'a SiteConfig) -> Self {
        Self::with_utilities(config, Box::new(super::css::NoUtilities))
    }

    /// Produce the artifact for one source file.
    ///
    /// The parent directory of `output` must already exist. Any read,
    /// transform or write failure is returned with the path attached.
    pub fn process_file(&self, kind: AssetKind, input: &Path, output: &Path) -> Result<()> {
        debug!(kind.name(); "{} -> {}", input.display(), output.display());

        match kind {
            AssetKind::Html => {
                let source = read(input)?;
                let minified = minify_html(&source, &self.config.build.html);
                write(output, minified)
            }
            AssetKind::Js => {
                let source = read_to_string(input)?;
                let code = transform_jsx(&source, input, &self.config.build.js)?;
                write(output, code)
            }
            AssetKind::Css => {
                let source = read_to_string(input)?;
                let css = transform_css(
                    &source,
                    input,
                    self.utilities.as_ref(),
                    &self.config.build.css,
                )?;
                write(output, css)
            }
            AssetKind::Other => {
                fs::copy(input, output).with_context(|| {
                    format!(
                        "failed to copy `{}` to `{}`",
                        input.display(),
                        output.display()
                    )
                })?;
                Ok(())
            }
        }
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read `{}`", path.display()))
}

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read `{}`", path.display()))
}

fn write(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write `{}`", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::TransformError;
    use crate::config::test_config_at;
    use tempfile::TempDir;

    struct RedUtility;

    impl UtilityProcessor for RedUtility {
        fn expand(&self, source: &str, _path: &Path) -> Result<String, TransformError> {
            Ok(source.replace("@apply red;", "color: red;"))
        }
    }

    fn setup() -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        let config = test_config_at(dir.path());
        (dir, config)
    }

    #[test]
    fn test_copy_is_byte_exact() {
        let (dir, config) = setup();
        let input = dir.path().join("logo.png");
        let output = dir.path().join("out.png");
        let bytes: Vec<u8> = (0..=255).collect();
        fs::write(&input, &bytes).unwrap();

        AssetPipeline::without_utilities(&config)
            .process_file(AssetKind::Other, &input, &output)
            .unwrap();
        assert_eq!(fs::read(&output).unwrap(), bytes);
    }

    #[test]
    fn test_html_file() {
        let (dir, config) = setup();
        let input = dir.path().join("index.html");
        let output = dir.path().join("out.html");
        fs::write(&input, "<p>\n   hi   \n</p>\n<!-- c -->\n").unwrap();

        AssetPipeline::without_utilities(&config)
            .process_file(AssetKind::Html, &input, &output)
            .unwrap();
        let out = fs::read_to_string(&output).unwrap();
        assert!(out.contains("<!-- c -->"));
        assert!(!out.contains("\n   "));
    }

    #[test]
    fn test_css_file_uses_processor() {
        let (dir, config) = setup();
        let input = dir.path().join("style.css");
        let output = dir.path().join("out.css");
        fs::write(&input, ".a {\n  @apply red;\n}\n").unwrap();

        AssetPipeline::with_utilities(&config, Box::new(RedUtility))
            .process_file(AssetKind::Css, &input, &output)
            .unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), ".a{color:red}");
    }

    #[test]
    fn test_js_error_names_file() {
        let (dir, config) = setup();
        let input = dir.path().join("broken.js");
        let output = dir.path().join("out.js");
        fs::write(&input, "const = <div>").unwrap();

        let err = AssetPipeline::without_utilities(&config)
            .process_file(AssetKind::Js, &input, &output)
            .unwrap_err();
        let err = err.downcast::<TransformError>().unwrap();
        assert_eq!(err.path(), input);
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_parent_fails() {
        let (dir, config) = setup();
        let input = dir.path().join("a.txt");
        fs::write(&input, "a").unwrap();

        let err = AssetPipeline::without_utilities(&config)
            .process_file(AssetKind::Other, &input, &dir.path().join("missing/a.txt"))
            .unwrap_err();
        assert!(err.to_string().contains("failed to copy"));
    }
}
