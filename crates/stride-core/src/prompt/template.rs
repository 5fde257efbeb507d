use crate::error::{CoachError, Result};
use minijinja::Environment;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Load a prompt template from disk and substitute the named variables.
///
/// Templates are pure substitution - `{{ name }}` placeholders only, no
/// control flow. Every placeholder the template references must be present
/// in `vars`; the error names the first missing one.
pub fn render(template_path: impl AsRef<Path>, vars: &HashMap<String, String>) -> Result<String> {
    let template_path = template_path.as_ref();

    let source = match fs::read_to_string(template_path) {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CoachError::NotFound(template_path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };

    let env = Environment::new();
    let template = env
        .template_from_str(&source)
        .map_err(|e| CoachError::parse(template_path, e.to_string()))?;

    let mut referenced: Vec<String> = template.undeclared_variables(false).into_iter().collect();
    referenced.sort();
    for name in referenced {
        if !vars.contains_key(&name) {
            return Err(CoachError::MissingVariable(name));
        }
    }

    template
        .render(vars)
        .map_err(|e| CoachError::parse(template_path, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_template(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.txt");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn render_substitutes_all_placeholders() {
        let (_dir, path) = write_template("Data: {{ run_data }}\nNote: {{ custom_note }}");
        let mut vars = HashMap::new();
        vars.insert("run_data".to_string(), "5k in 25:00".to_string());
        vars.insert("custom_note".to_string(), "felt good".to_string());

        let rendered = render(&path, &vars).unwrap();
        assert_eq!(rendered, "Data: 5k in 25:00\nNote: felt good");
        assert!(!rendered.contains("{{"));
    }

    #[test]
    fn render_names_the_missing_placeholder() {
        let (_dir, path) = write_template("{{ run_data }} {{ custom_note }}");
        let mut vars = HashMap::new();
        vars.insert("run_data".to_string(), "data".to_string());

        match render(&path, &vars).unwrap_err() {
            CoachError::MissingVariable(name) => assert_eq!(name, "custom_note"),
            other => panic!("expected MissingVariable, got {other:?}"),
        }
    }

    #[test]
    fn render_missing_template_is_not_found() {
        let err = render("no/such/template.txt", &HashMap::new()).unwrap_err();
        assert!(matches!(err, CoachError::NotFound(_)));
    }
}
