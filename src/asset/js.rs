//! JSX to plain JavaScript.
//!
//! Element syntax is rewritten to calls of a pragma function (classic JSX
//! runtime), and a small DOM-building helper defining that function is
//! prepended. The output runs in a browser as a plain script with no
//! runtime library. Nothing is bundled, resolved or minified.

use std::borrow::Cow;
use std::path::Path;

use oxc::allocator::Allocator;
use oxc::codegen::Codegen;
use oxc::parser::Parser;
use oxc::semantic::SemanticBuilder;
use oxc::span::SourceType;
use oxc::transformer::{JsxOptions, JsxRuntime, TransformOptions, Transformer};

use crate::config::{DEFAULT_PRAGMA, JsConfig};

use super::TransformError;

/// Element-creation helper inlined at the top of every script.
///
/// `tag` becomes a DOM element, `props` become attributes (`className`
/// maps to the class), and string children become text nodes. Arrays of
/// children, as produced by `{items.map(...)}`, are flattened one level.
pub const PREAMBLE: &str = r#"
function ___CreateElement___(tag, props, ...children) {
  const element = document.createElement(tag);

  if (props) {
    Object.keys(props).forEach((key) => {
      if (key === 'className') {
        // JSX uses className instead of class
        element.className = props[key];
      } else {
        element.setAttribute(key, props[key]);
      }
    });
  }

  children.forEach((child) => {
    if (Array.isArray(child)) {
      child.forEach((c) => {
        if (typeof c === 'string') {
          element.appendChild(document.createTextNode(c));
        } else {
          element.appendChild(c);
        }
      });
    } else if (typeof child === 'string') {
      element.appendChild(document.createTextNode(child));
    } else {
      element.appendChild(child);
    }
  });

  return element;
}

"#;

/// The preamble with its function renamed to `pragma`.
pub fn preamble(pragma: &str) -> Cow<'static, str> {
    if pragma == DEFAULT_PRAGMA {
        Cow::Borrowed(PREAMBLE)
    } else {
        Cow::Owned(PREAMBLE.replace(DEFAULT_PRAGMA, pragma))
    }
}

/// Transpile one JSX-flavoured script.
///
/// `path` only feeds diagnostics. With `config.preamble` set, the output
/// is the preamble text verbatim followed by the transformed source.
pub fn transform_jsx(
    source: &str,
    path: &Path,
    config: &JsConfig,
) -> Result<String, TransformError> {
    let allocator = Allocator::default();
    let source_type = SourceType::mjs().with_jsx(true);

    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        return Err(TransformError::js(path, &ret.errors));
    }
    let mut program = ret.program;

    let ret = SemanticBuilder::new().build(&program);
    if !ret.errors.is_empty() {
        return Err(TransformError::js(path, &ret.errors));
    }
    let scoping = ret.semantic.into_scoping();

    let options = TransformOptions {
        jsx: JsxOptions {
            jsx_plugin: true,
            display_name_plugin: false,
            runtime: JsxRuntime::Classic,
            pure: false,
            pragma: Some(config.pragma.clone()),
            ..JsxOptions::default()
        },
        ..TransformOptions::default()
    };
    let ret =
        Transformer::new(&allocator, path, &options).build_with_scoping(scoping, &mut program);
    if !ret.errors.is_empty() {
        return Err(TransformError::js(path, &ret.errors));
    }

    let code = Codegen::new().build(&program).code;

    if config.preamble {
        let mut out = preamble(&config.pragma).into_owned();
        out.push_str(&code);
        Ok(out)
    } else {
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform(source: &str) -> String {
        transform_jsx(source, Path::new("widget.js"), &JsConfig::default()).unwrap()
    }

    #[test]
    fn test_single_element() {
        let out = transform("const el = <p>hello</p>;\ndocument.body.appendChild(el);\n");

        assert!(out.starts_with(PREAMBLE));
        let body = &out[PREAMBLE.len()..];
        assert!(body.contains("___CreateElement___(\"p\", null, \"hello\")"));
        assert!(!body.contains("<p>"));
        assert!(!body.contains("</p>"));
        assert!(body.contains("document.body.appendChild(el)"));
    }

    #[test]
    fn test_props_and_nesting() {
        let out = transform(
            r#"const list = <ul className="items">{["a", "b"].map((x) => <li>{x}</li>)}</ul>;"#,
        );
        let body = &out[PREAMBLE.len()..];

        assert!(body.contains("___CreateElement___(\"ul\""));
        assert!(body.contains("className: \"items\""));
        assert!(body.contains("___CreateElement___(\"li\", null, x)"));
        assert!(!body.contains("<li>"));
    }

    #[test]
    fn test_plain_js_passes_through() {
        let out = transform("function add(a, b) {\n  return a + b;\n}\n");
        let body = &out[PREAMBLE.len()..];
        assert!(body.contains("function add(a, b)"));
        assert!(!body.contains("___CreateElement___"));
    }

    #[test]
    fn test_custom_pragma() {
        let config = JsConfig {
            pragma: "h".into(),
            preamble: true,
        };
        let out = transform_jsx("const x = <b>hi</b>;", Path::new("a.js"), &config).unwrap();

        assert!(out.contains("function h(tag, props, ...children)"));
        assert!(!out.contains(DEFAULT_PRAGMA));
        assert!(out.contains("h(\"b\", null, \"hi\")"));
    }

    #[test]
    fn test_without_preamble() {
        let config = JsConfig {
            pragma: "React.createElement".into(),
            preamble: false,
        };
        let out = transform_jsx("const x = <b />;", Path::new("a.js"), &config).unwrap();

        assert!(!out.contains("function "));
        assert!(out.contains("React.createElement(\"b\", null)"));
    }

    #[test]
    fn test_syntax_error() {
        let err = transform_jsx("const x = <div>;", Path::new("broken.js"), &JsConfig::default())
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("broken.js"));
    }

    #[test]
    fn test_deterministic() {
        let src = "export const App = () => <main id=\"app\">hi</main>;";
        assert_eq!(transform(src), transform(src));
    }
}
