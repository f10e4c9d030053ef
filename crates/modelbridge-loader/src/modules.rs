use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use modelbridge_config::BridgeConfig;
use modelbridge_core::{SourceApps, SourceModule};
use tracing::debug;

const MODELS_FILE_STEM: &str = "models";
const EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Directory of an installed application, relative to the project root.
///
/// Framework-provided apps (`django.contrib.auth`) are kept whole; project
/// apps are addressed by their top-level package (`books.apps.BooksConfig`
/// lives in `books`).
pub fn app_dir(app: &str) -> PathBuf {
    if app.starts_with("django.") {
        app.split('.').collect()
    } else {
        PathBuf::from(app.split('.').next().unwrap_or(app))
    }
}

/// The models file of `app`, trying each supported extension in turn.
pub(crate) fn models_file(root: &Path, app: &str) -> Option<PathBuf> {
    let dir = root.join(app_dir(app));
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", MODELS_FILE_STEM, ext)))
        .find(|path| path.is_file())
}

/// Read one source module from a JSON or YAML file.
///
/// Models without a declaring module are attributed to this one.
pub fn load_module(path: &Path) -> Result<SourceModule> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read source module: {}", path.display()))?;

    let ext = path.extension().and_then(|s| s.to_str());
    let mut module: SourceModule = match ext {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("parse JSON source module: {}", path.display()))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("parse YAML source module: {}", path.display()))?,
        _ => anyhow::bail!("unsupported source module format: {}", path.display()),
    };

    for model in &mut module.models {
        if model.module.is_empty() {
            model.module = module.name.clone();
        }
    }
    Ok(module)
}

/// Load the source modules of every installed app, paired with the app entry
/// they were found for. Apps without a models file are skipped.
pub(crate) fn load_app_modules(
    root: &Path,
    config: &BridgeConfig,
) -> Result<Vec<(String, SourceModule)>> {
    let mut modules = Vec::new();
    for app in config.installed_apps() {
        match models_file(root, app) {
            Some(path) => modules.push((app.clone(), load_module(&path)?)),
            None => debug!(app = %app, "no models file, skipping"),
        }
    }
    Ok(modules)
}

/// Load every installed app's source module into one catalog.
pub fn load_apps(root: &Path, config: &BridgeConfig) -> Result<SourceApps> {
    let mut apps = SourceApps::new();
    for (_, module) in load_app_modules(root, config)? {
        apps.insert(module);
    }
    Ok(apps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelbridge_core::{ModelCatalog, ModelRef, RelationKind};
    use rstest::rstest;
    use tempfile::tempdir;

    const BOOKS_YAML: &str = r#"
name: books.models
models:
  - app_label: books
    object_name: Author
    fields:
      - { name: id, class: AutoField, primary_key: true }
      - { name: name, class: CharField, max_length: 100 }
  - app_label: books
    object_name: Book
    fields:
      - { name: id, class: AutoField, primary_key: true }
      - name: author
        class: ForeignKey
        relation: { kind: foreign_key, to: books.Author, on_delete: CASCADE }
"#;

    #[rstest]
    #[case("books", "books")]
    #[case("books.apps.BooksConfig", "books")]
    #[case("django.contrib.auth", "django/contrib/auth")]
    fn test_app_dir(#[case] app: &str, #[case] expected: &str) {
        assert_eq!(app_dir(app), PathBuf::from(expected));
    }

    #[test]
    fn test_load_module_fills_declaring_module() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("models.yaml");
        fs::write(&path, BOOKS_YAML).unwrap();

        let module = load_module(&path).unwrap();
        assert_eq!(module.name, "books.models");
        assert!(module.models.iter().all(|m| m.module == "books.models"));
        let book = module.model(&ModelRef::new("books", "Book")).unwrap();
        let relation = book.fields[1].relation.as_ref().unwrap();
        assert_eq!(relation.kind, RelationKind::ForeignKey);
        assert_eq!(relation.to, ModelRef::new("books", "Author"));
    }

    #[test]
    fn test_load_module_keeps_imported_models() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("models.json");
        fs::write(
            &path,
            r#"{"name": "sales.models", "models": [
                {"app_label": "books", "object_name": "Book", "module": "books.models"}
            ]}"#,
        )
        .unwrap();

        let module = load_module(&path).unwrap();
        assert_eq!(module.models[0].module, "books.models");
        assert_eq!(module.declared_models().count(), 0);
    }

    #[test]
    fn test_load_module_rejects_unknown_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("models.toml");
        fs::write(&path, "name = 'x'").unwrap();
        let err = load_module(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported source module format"));
    }

    #[test]
    fn test_load_apps_skips_apps_without_models() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("books")).unwrap();
        fs::write(dir.path().join("books/models.yml"), BOOKS_YAML).unwrap();
        let config = BridgeConfig {
            installed_apps: vec!["books.apps.BooksConfig".into(), "django.contrib.auth".into()],
            ..BridgeConfig::default()
        };

        let apps = load_apps(dir.path(), &config).unwrap();
        assert_eq!(apps.len(), 1);
        assert!(apps.model(&ModelRef::new("books", "Author")).is_some());
    }

    #[test]
    fn test_load_apps_propagates_parse_errors() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("books")).unwrap();
        fs::write(dir.path().join("books/models.json"), "[").unwrap();
        let config = BridgeConfig {
            installed_apps: vec!["books".into()],
            ..BridgeConfig::default()
        };

        let err = load_apps(dir.path(), &config).unwrap_err();
        assert!(err.to_string().starts_with("parse JSON source module"));
    }
}
