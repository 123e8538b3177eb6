//! Site building orchestration.
//!
//! Build pipeline phases:
//! - **Clean** - Remove the output root (only with `clean`)
//! - **Scan** - List every file and directory under the source root
//! - **Plan** - Order the steps: output root, mirrored directories, files
//! - **Execute** - Run the steps one at a time, stopping at the first error

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::asset::{AssetKind, AssetPipeline, SourceTree, scan_source_tree};
use crate::config::SiteConfig;
use crate::utils::plural_count;
use crate::{debug, log};

/// One filesystem action of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStep {
    /// Create `output/<rel>` if missing. An empty path is the output root.
    CreateDir(PathBuf),
    /// Produce `output/<rel>` from `source/<rel>`.
    Process { kind: AssetKind, rel: PathBuf },
}

/// Ordered steps for one build.
///
/// Every directory step precedes the file steps below it: the output root
/// comes first, then directories in scan order (parents before children),
/// then all files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    pub steps: Vec<BuildStep>,
}

impl BuildPlan {
    pub fn from_tree(tree: &SourceTree) -> Self {
        let mut steps = Vec::with_capacity(1 + tree.dirs.len() + tree.files.len());

        steps.push(BuildStep::CreateDir(PathBuf::new()));
        steps.extend(tree.dirs.iter().cloned().map(BuildStep::CreateDir));
        steps.extend(tree.files.iter().map(|rel| BuildStep::Process {
            kind: AssetKind::from_path(rel),
            rel: rel.clone(),
        }));

        Self { steps }
    }
}

/// What a finished build produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    pub dirs: usize,
    pub html: usize,
    pub js: usize,
    pub css: usize,
    pub copied: usize,
}

impl BuildStats {
    pub const fn files(&self) -> usize {
        self.html + self.js + self.css + self.copied
    }

    fn record(&mut self, kind: AssetKind) {
        match kind {
            AssetKind::Html => self.html += 1,
            AssetKind::Js => self.js += 1,
            AssetKind::Css => self.css += 1,
            AssetKind::Other => self.copied += 1,
        }
    }
}

/// Build the site with the configured utility processor.
pub fn build_site(config: &SiteConfig) -> Result<BuildStats> {
    build_with(config, &AssetPipeline::new(config))
}

/// Build the site from `config.build.source` into `config.build.output`.
///
/// Stops at the first failure. Files written before it stay on disk.
pub fn build_with(config: &SiteConfig, pipeline: &AssetPipeline<'_>) -> Result<BuildStats> {
    let source = &config.build.source;
    let output = &config.build.output;

    if config.build.clean {
        clean_output(output)?;
    }

    let tree = scan_source_tree(source)?;
    let plan = BuildPlan::from_tree(&tree);
    debug!("build"; "{} planned", plural_count(plan.steps.len(), "step"));

    let stats = execute(&plan, source, output, pipeline)?;
    debug!("build"; "{} new output dirs", stats.dirs);

    log!(
        "build";
        "built {} ({} html, {} js, {} css, {} copied) into {}",
        plural_count(stats.files(), "file"),
        stats.html,
        stats.js,
        stats.css,
        stats.copied,
        config.root_relative(output).display()
    );

    Ok(stats)
}

/// Run every step in order.
fn execute(
    plan: &BuildPlan,
    source: &Path,
    output: &Path,
    pipeline: &AssetPipeline<'_>,
) -> Result<BuildStats> {
    let mut stats = BuildStats::default();

    for step in &plan.steps {
        match step {
            BuildStep::CreateDir(rel) => {
                if ensure_dir(&output.join(rel))? && !rel.as_os_str().is_empty() {
                    stats.dirs += 1;
                }
            }
            BuildStep::Process { kind, rel } => {
                pipeline.process_file(*kind, &source.join(rel), &output.join(rel))?;
                stats.record(*kind);
            }
        }
    }

    Ok(stats)
}

/// Create `dir` if it doesn't exist. Returns whether it was created.
fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    // The output root may sit below directories that don't exist yet
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory `{}`", dir.display()))?;
    Ok(true)
}

/// Remove the output root and everything in it.
fn clean_output(output: &Path) -> Result<()> {
    if output.exists() {
        debug!("build"; "cleaning {}", output.display());
        fs::remove_dir_all(output)
            .with_context(|| format!("failed to clean output directory `{}`", output.display()))?;
    }
    Ok(())
}
