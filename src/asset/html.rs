//! HTML minification.

use crate::config::HtmlConfig;

/// Minify an HTML document.
///
/// Inter-attribute whitespace and comments are kept or dropped per
/// `config`; everything else follows minify-html's defaults, which leave
/// inline `<script>`/`<style>` bodies untouched.
pub fn minify_html(source: &[u8], config: &HtmlConfig) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_spaces_between_attributes = config.keep_spaces_between_attributes;
    cfg.keep_comments = config.keep_comments;
    minify_html::minify(source, &cfg)
}
