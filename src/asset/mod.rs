//! Source scanning, dispatch and the per-format transformers.

pub mod css;
mod error;
pub mod html;
pub mod js;
mod kind;
mod process;
mod scan;

// Types
pub use error::TransformError;
pub use kind::AssetKind;

// Scanning (pure functions)
pub use scan::{SourceTree, scan_source_tree};

// Processing (side effects)
pub use process::AssetPipeline;
