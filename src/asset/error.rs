//! Errors reported by the format transformers.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A transformer rejected its input.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("JSX transform failed for `{}`:\n{message}", path.display())]
    Js { path: PathBuf, message: String },

    #[error("CSS processing failed for `{}`:\n{message}", path.display())]
    Css { path: PathBuf, message: String },

    #[error("CSS utility processor failed for `{}`:\n{message}", path.display())]
    Processor { path: PathBuf, message: String },
}

impl TransformError {
    /// Collect oxc diagnostics into one error.
    pub fn js<D: Display>(path: &Path, diagnostics: &[D]) -> Self {
        let message = diagnostics
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        Self::Js {
            path: path.to_path_buf(),
            message,
        }
    }

    pub fn css(path: &Path, error: impl Display) -> Self {
        Self::Css {
            path: path.to_path_buf(),
            message: error.to_string(),
        }
    }

    /// Path of the file that failed.
    #[cfg(test)]
    pub fn path(&self) -> &Path {
        match self {
            Self::Js { path, .. } | Self::Css { path, .. } | Self::Processor { path, .. } => path,
        }
    }
}
