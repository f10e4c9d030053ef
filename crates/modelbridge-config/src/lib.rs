pub mod config;
pub mod name_case;
pub mod selector;

pub use config::{
    default_autoload_module, AutoloadConfig, BackReferenceStyle, BridgeConfig,
    MissingTypePolicy, TransferOptions,
};
pub use name_case::NameCase;
pub use selector::BackendSelector;

#[cfg(test)]
mod tests {
    use super::*;
    use modelbridge_core::Backend;

    #[test]
    fn default_config_is_permissive_and_autodetects() {
        let cfg = BridgeConfig::default();
        assert!(cfg.aliases().is_empty());
        assert_eq!(cfg.missing_type_policy(), MissingTypePolicy::Permissive);
        assert_eq!(cfg.autoload().option.backend, BackendSelector::AutoDetect);
        assert_eq!(cfg.active_backend(&cfg.autoload().option), Backend::Default);
    }

    #[test]
    fn overrides_work_via_struct_update() {
        let cfg = BridgeConfig {
            database_engine: Some("django.db.backends.mysql".into()),
            missing_type_policy: MissingTypePolicy::Strict,
            ..Default::default()
        };
        assert_eq!(cfg.active_backend(&TransferOptions::default()), Backend::Mysql);
        assert!(cfg.missing_type_policy().is_strict());
    }
}
