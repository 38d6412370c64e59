//! Template rendering for configuration generation.
//!
//! Thin wrapper around the templating engine that classifies its failure
//! modes into distinct registry codes, so a missing variable, a syntax
//! error, and a missing template file stay distinguishable downstream.

use std::path::Path;

use minijinja::{path_loader, Environment, ErrorKind, UndefinedBehavior};
use serde::Serialize;

use crate::error::{ClassifiedError, Result};

/// Render a named template from a search path with the given context.
///
/// Undefined variables are errors, not silently empty output: generated
/// device configuration with a hole in it is worse than no configuration.
pub fn render_template(
    template_name: &str,
    search_path: &Path,
    context: impl Serialize,
) -> Result<String> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_loader(path_loader(search_path));

    let template = env
        .get_template(template_name)
        .map_err(classify_template_error)?;
    template.render(context).map_err(classify_template_error)
}

/// Map a templating failure to its registry code.
fn classify_template_error(err: minijinja::Error) -> ClassifiedError {
    let code = match err.kind() {
        ErrorKind::UndefinedError => "E1010",
        ErrorKind::SyntaxError => "E1011",
        ErrorKind::TemplateNotFound => "E1012",
        ErrorKind::UnknownFilter
        | ErrorKind::UnknownTest
        | ErrorKind::UnknownFunction
        | ErrorKind::InvalidOperation => "E1013",
        _ => "E1014",
    };
    ClassifiedError::new(code, &[("error", &err.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_template(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_render_with_context() {
        let dir = tempfile::tempdir().unwrap();
        write_template(
            dir.path(),
            "base.j2",
            "hostname {{ hostname }}\nntp server {{ ntp }}",
        );
        let rendered = render_template(
            "base.j2",
            dir.path(),
            json!({"hostname": "edge-router-01", "ntp": "10.0.0.1"}),
        )
        .unwrap();
        assert_eq!(rendered, "hostname edge-router-01\nntp server 10.0.0.1");
    }

    #[test]
    fn test_undefined_variable() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "base.j2", "hostname {{ hostname }}");
        let err = render_template("base.j2", dir.path(), json!({})).unwrap_err();
        assert_eq!(err.code, "E1010");
    }

    #[test]
    fn test_syntax_error() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "base.j2", "{% for x %}");
        let err = render_template("base.j2", dir.path(), json!({})).unwrap_err();
        assert_eq!(err.code, "E1011");
    }

    #[test]
    fn test_template_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_template("missing.j2", dir.path(), json!({})).unwrap_err();
        assert_eq!(err.code, "E1012");
    }

    #[test]
    fn test_unknown_filter() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "base.j2", "{{ hostname | frobnicate }}");
        let err =
            render_template("base.j2", dir.path(), json!({"hostname": "sw1"})).unwrap_err();
        assert_eq!(err.code, "E1013");
    }
}
