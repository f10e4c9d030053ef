use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use modelbridge_core::Backend;

use crate::name_case::NameCase;
use crate::selector::BackendSelector;

/// Default name of the per-application module holding target schemas.
pub fn default_autoload_module() -> String {
    "models_sqla".to_string()
}

/// How relationship back-references are wired onto target classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum BackReferenceStyle {
    /// Each relationship creates its reverse attribute on the target class.
    #[default]
    Backref,
    /// No reverse attributes are created.
    Disabled,
}

impl BackReferenceStyle {
    pub fn is_enabled(self) -> bool {
        matches!(self, BackReferenceStyle::Backref)
    }
}

/// What to do with a field that has no column type for the active backend
/// nor a backend-agnostic default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum MissingTypePolicy {
    /// Omit the column from the target table.
    #[default]
    Permissive,
    /// Fail the build.
    Strict,
}

impl MissingTypePolicy {
    pub fn is_strict(self) -> bool {
        matches!(self, MissingTypePolicy::Strict)
    }
}

/// Options forwarded to every transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct TransferOptions {
    #[serde(alias = "db_type")]
    pub backend: BackendSelector,
    #[serde(alias = "back_type")]
    pub back_reference: BackReferenceStyle,
    /// Publish bare tables instead of declarative classes.
    #[serde(alias = "as_table")]
    pub as_table: bool,
    /// Case applied to source model names when publishing.
    pub name_case: NameCase,
}

/// Where autoload looks for pre-built target schemas, and how it builds the
/// missing ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct AutoloadConfig {
    #[serde(default = "default_autoload_module")]
    pub module: String,
    #[serde(default)]
    pub option: TransferOptions,
}

impl Default for AutoloadConfig {
    fn default() -> Self {
        Self {
            module: default_autoload_module(),
            option: TransferOptions::default(),
        }
    }
}

/// Top-level modelbridge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeConfig {
    /// Custom field class name -> registered field class it maps like.
    #[serde(alias = "ALIASES")]
    pub aliases: IndexMap<String, String>,
    #[serde(alias = "AUTOLOAD")]
    pub autoload: AutoloadConfig,
    /// Application packages to scan during autoload, in order.
    #[serde(alias = "INSTALLED_APPS")]
    pub installed_apps: Vec<String>,
    /// Engine of the active database connection, used to autodetect the backend.
    #[serde(alias = "ENGINE")]
    pub database_engine: Option<String>,
    pub missing_type_policy: MissingTypePolicy,
}

impl BridgeConfig {
    pub fn aliases(&self) -> &IndexMap<String, String> {
        &self.aliases
    }

    pub fn autoload(&self) -> &AutoloadConfig {
        &self.autoload
    }

    pub fn installed_apps(&self) -> &[String] {
        &self.installed_apps
    }

    pub fn database_engine(&self) -> Option<&str> {
        self.database_engine.as_deref()
    }

    pub fn missing_type_policy(&self) -> MissingTypePolicy {
        self.missing_type_policy
    }

    /// Backend selected by `options`, with autodetection against this config's engine.
    pub fn active_backend(&self, options: &TransferOptions) -> Backend {
        options.backend.resolve(self.database_engine())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_config_default() {
        let config = BridgeConfig::default();

        assert!(config.aliases.is_empty());
        assert_eq!(config.autoload.module, "models_sqla");
        assert_eq!(config.autoload.option, TransferOptions::default());
        assert!(config.installed_apps.is_empty());
        assert_eq!(config.database_engine, None);
        assert_eq!(config.missing_type_policy, MissingTypePolicy::Permissive);
    }

    #[test]
    fn test_transfer_options_default() {
        let options = TransferOptions::default();
        assert_eq!(options.backend, BackendSelector::AutoDetect);
        assert_eq!(options.back_reference, BackReferenceStyle::Backref);
        assert!(!options.as_table);
        assert_eq!(options.name_case, NameCase::Pascal);
    }

    #[test]
    fn test_parse_camel_case_config() {
        let config: BridgeConfig = serde_json::from_str(
            r#"{
                "aliases": {"MoneyField": "DecimalField"},
                "autoload": {"option": {"backend": "postgresql", "asTable": true}},
                "installedApps": ["django.contrib.auth", "books"],
                "databaseEngine": "django.db.backends.sqlite3",
                "missingTypePolicy": "strict"
            }"#,
        )
        .unwrap();

        assert_eq!(config.aliases["MoneyField"], "DecimalField");
        assert_eq!(config.autoload.module, "models_sqla");
        assert_eq!(
            config.autoload.option.backend,
            BackendSelector::Fixed(Backend::Postgresql)
        );
        assert!(config.autoload.option.as_table);
        assert_eq!(config.installed_apps, vec!["django.contrib.auth", "books"]);
        assert_eq!(config.active_backend(&TransferOptions::default()), Backend::Sqlite3);
        assert!(config.missing_type_policy.is_strict());
    }

    #[test]
    fn test_parse_uppercase_option_names() {
        let config: BridgeConfig = serde_json::from_str(
            r#"{
                "ALIASES": {"CITextField": "TextField"},
                "AUTOLOAD": {"module": "schema_sqla", "option": {"db_type": "mysql", "back_type": "disabled"}}
            }"#,
        )
        .unwrap();

        assert_eq!(config.aliases["CITextField"], "TextField");
        assert_eq!(config.autoload.module, "schema_sqla");
        assert_eq!(config.autoload.option.backend, BackendSelector::Fixed(Backend::Mysql));
        assert!(!config.autoload.option.back_reference.is_enabled());
    }

    #[cfg(feature = "schema")]
    #[test]
    fn test_json_schema_lists_top_level_options() {
        let schema = schemars::schema_for!(BridgeConfig);
        let value = serde_json::to_value(&schema).unwrap();
        let properties = value["properties"].as_object().unwrap();
        for key in ["aliases", "autoload", "installedApps", "databaseEngine", "missingTypePolicy"] {
            assert!(properties.contains_key(key), "missing property {key}");
        }
    }
}
