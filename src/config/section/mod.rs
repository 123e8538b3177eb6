//! Configuration section definitions.
//!
//! Each module corresponds to a section in `kiln.toml`:
//!
//! | Module     | TOML Section   | Purpose                              |
//! |------------|----------------|--------------------------------------|
//! | `build`    | `[build]`      | Source/output roots, html, js, css   |

pub mod build;

pub use build::{
    BrowserTargets, BuildSectionConfig, CssConfig, DEFAULT_PRAGMA, HtmlConfig, JsConfig,
};
