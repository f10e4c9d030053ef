use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use modelbridge_config::BridgeConfig;

pub const CONFIG_FILE: &str = "modelbridge.json";

/// Load modelbridge.json from the current directory.
pub fn load_config() -> Result<BridgeConfig> {
    let path = PathBuf::from(CONFIG_FILE);
    if !path.exists() {
        anyhow::bail!("{} not found in the current directory", CONFIG_FILE);
    }
    load_config_from_path(path)
}

/// Load config from a specific path.
pub fn load_config_from_path(path: PathBuf) -> Result<BridgeConfig> {
    if !path.exists() {
        anyhow::bail!("{} not found at: {}", CONFIG_FILE, path.display());
    }

    let content =
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let config: BridgeConfig =
        serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))?;
    Ok(config)
}

/// Load config from project root, with fallback to defaults.
pub fn load_config_or_default(project_root: Option<PathBuf>) -> Result<BridgeConfig> {
    let config_path = match project_root {
        Some(root) => root.join(CONFIG_FILE),
        None => PathBuf::from(CONFIG_FILE),
    };

    if config_path.exists() {
        load_config_from_path(config_path)
    } else {
        Ok(BridgeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelbridge_config::{BackendSelector, MissingTypePolicy};
    use modelbridge_core::Backend;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_or_default_without_file() {
        let dir = tempdir().unwrap();
        let config = load_config_or_default(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_load_config_accepts_uppercase_option_names() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{
                "ALIASES": {"MoneyField": "DecimalField"},
                "AUTOLOAD": {"module": "tables", "option": {"backend": "mysql", "as_table": true}},
                "INSTALLED_APPS": ["books", "django.contrib.auth"],
                "missingTypePolicy": "strict"
            }"#,
        )
        .unwrap();

        let config = load_config_or_default(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.aliases["MoneyField"], "DecimalField");
        assert_eq!(config.autoload.module, "tables");
        assert_eq!(config.autoload.option.backend, BackendSelector::Fixed(Backend::Mysql));
        assert!(config.autoload.option.as_table);
        assert_eq!(config.installed_apps, vec!["books", "django.contrib.auth"]);
        assert_eq!(config.missing_type_policy, MissingTypePolicy::Strict);
    }

    #[test]
    fn test_load_config_from_missing_path() {
        let dir = tempdir().unwrap();
        let err = load_config_from_path(dir.path().join(CONFIG_FILE)).unwrap_err();
        assert!(err.to_string().contains("not found at"));
    }

    #[test]
    fn test_load_config_reports_parse_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();
        let err = load_config_from_path(path).unwrap_err();
        assert!(format!("{:#}", err).starts_with("parse "));
    }
}
