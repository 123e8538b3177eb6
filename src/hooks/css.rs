//! Utility-class processor run as an external command.
//!
//! The stylesheet is piped on stdin and the expanded CSS read from stdout,
//! which matches Tailwind's CLI: `tailwindcss -i -`. The processor runs in
//! the project root so it finds its own config file there.

use std::path::{Path, PathBuf};

use crate::asset::TransformError;
use crate::asset::css::{NoUtilities, UtilityProcessor};
use crate::config::SiteConfig;
use crate::utils::exec::{Cmd, EMPTY_FILTER, FilterRule, SILENT_FILTER};

use super::{build_kiln_vars, resolve_args};

/// Noise printed by processors on every run.
const PROCESSOR_FILTER: FilterRule = FilterRule::new(&["Browserslist:", "Rebuilding", "Done in"]);

/// Processor backed by `[build.css.processor]`.
pub struct CommandProcessor<'a> {
    config: &'a SiteConfig,
    command: Vec<String>,
    quiet: bool,
}

impl<'a> CommandProcessor<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        let processor = &config.build.css.processor;
        Self {
            config,
            command: processor.command.clone(),
            quiet: processor.quiet,
        }
    }

    fn filter(&self) -> &'static FilterRule {
        if self.quiet {
            &SILENT_FILTER
        } else if crate::logger::is_verbose() {
            &EMPTY_FILTER
        } else {
            &PROCESSOR_FILTER
        }
    }
}

impl UtilityProcessor for CommandProcessor<'_> {
    fn expand(&self, source: &str, path: &Path) -> Result<String, TransformError> {
        let processor_error = |message: String| TransformError::Processor {
            path: PathBuf::from(path),
            message,
        };

        let vars = build_kiln_vars(self.config, path);
        let command = resolve_args(&self.command, &vars);

        let output = Cmd::from_slice(&command)
            .cwd(self.config.get_root())
            .envs(vars)
            .stdin(source)
            .filter(self.filter())
            .run()
            .map_err(|e| processor_error(format!("{e:#}")))?;

        String::from_utf8(output.stdout)
            .map_err(|_| processor_error("output is not valid UTF-8".into()))
    }
}

/// Utility processor for this build: the command if enabled, else a no-op.
pub fn utility_processor(config: &SiteConfig) -> Box<dyn UtilityProcessor + '_> {
    if config.build.css.processor.enable {
        Box::new(CommandProcessor::new(config))
    } else {
        Box::new(NoUtilities)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use tempfile::TempDir;

    fn config_with(dir: &Path, command: &[&str]) -> SiteConfig {
        let mut config = test_config_at(dir);
        config.build.css.processor.enable = true;
        config.build.css.processor.command = command.iter().map(|s| s.to_string()).collect();
        config
    }

    #[test]
    fn test_pipes_source_through_command() {
        let dir = TempDir::new().unwrap();
        let config = config_with(dir.path(), &["sed", "s/@apply p-4;/padding: 1rem;/"]);

        let processor = utility_processor(&config);
        let out = processor
            .expand(".a { @apply p-4; }", Path::new("a.css"))
            .unwrap();
        assert_eq!(out.trim(), ".a { padding: 1rem; }");
    }

    #[test]
    fn test_exports_input_path() {
        let dir = TempDir::new().unwrap();
        let config = config_with(dir.path(), &["sh", "-c", "printf '/* %s */' \"$KILN_INPUT\""]);

        let out = CommandProcessor::new(&config)
            .expand("", Path::new("/site/src/a.css"))
            .unwrap();
        assert_eq!(out, "/* /site/src/a.css */");
    }

    #[test]
    fn test_runs_in_project_root() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker.css"), ".m{}").unwrap();
        let config = config_with(dir.path(), &["cat", "marker.css"]);

        let out = CommandProcessor::new(&config)
            .expand("ignored", Path::new("a.css"))
            .unwrap();
        assert_eq!(out, ".m{}");
    }

    #[test]
    fn test_failure_is_processor_error() {
        let dir = TempDir::new().unwrap();
        let config = config_with(dir.path(), &["sh", "-c", "echo 'bad class' >&2; exit 1"]);

        let err = CommandProcessor::new(&config)
            .expand(".a{}", Path::new("a.css"))
            .unwrap_err();
        assert!(matches!(err, TransformError::Processor { .. }));
        assert!(err.to_string().contains("bad class"));
    }

    #[test]
    fn test_enabled_by_default() {
        let dir = TempDir::new().unwrap();
        let mut config = crate::config::test_parse_config(
            "[build.css.processor]\ncommand = [\"sed\", \"s/@apply p-4;/padding: 1rem;/\"]",
        );
        config.root = dir.path().to_path_buf();

        let out = utility_processor(&config)
            .expand(".a { @apply p-4; }", Path::new("a.css"))
            .unwrap();
        assert_eq!(out.trim(), ".a { padding: 1rem; }");
    }

    #[test]
    fn test_disabled_is_passthrough() {
        let dir = TempDir::new().unwrap();
        let config = test_config_at(dir.path());
        let out = utility_processor(&config)
            .expand(".a { @apply p-4; }", Path::new("a.css"))
            .unwrap();
        assert_eq!(out, ".a { @apply p-4; }");
    }
}
