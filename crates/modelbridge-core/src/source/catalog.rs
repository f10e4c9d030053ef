use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::source::model::{ModelRef, SourceModel, SourceModule};

/// Read-only view of the source framework's model registry.
///
/// Relations name their targets by [`ModelRef`]; the parsers and builder
/// resolve them through this trait, so any introspection source can back a
/// translation run.
pub trait ModelCatalog {
    fn model(&self, key: &ModelRef) -> Option<&SourceModel>;
}

impl ModelCatalog for SourceModule {
    fn model(&self, key: &ModelRef) -> Option<&SourceModel> {
        self.models
            .iter()
            .find(|m| m.app_label == key.app_label && m.object_name == key.object_name)
    }
}

/// All loaded source modules, keyed by module name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceApps {
    modules: IndexMap<String, SourceModule>,
}

impl SourceApps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module, replacing any module previously loaded under the same name.
    pub fn insert(&mut self, module: SourceModule) {
        self.modules.insert(module.name.clone(), module);
    }

    pub fn with_module(mut self, module: SourceModule) -> Self {
        self.insert(module);
        self
    }

    pub fn module(&self, name: &str) -> Option<&SourceModule> {
        self.modules.get(name)
    }

    pub fn modules(&self) -> impl Iterator<Item = &SourceModule> {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModelCatalog for SourceApps {
    /// Prefers the declaring module's copy of a model over re-exports.
    fn model(&self, key: &ModelRef) -> Option<&SourceModel> {
        let mut imported = None;
        for module in self.modules.values() {
            if let Some(model) = module.model(key) {
                if model.module == module.name {
                    return Some(model);
                }
                imported.get_or_insert(model);
            }
        }
        imported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaring_module_wins_over_import() {
        let mut imported_user = SourceModel::new("auth", "User", "auth.models");
        imported_user.db_table = Some("imported".into());
        let apps = SourceApps::new()
            .with_module(SourceModule::new("books.models").with_model(imported_user))
            .with_module(
                SourceModule::new("auth.models")
                    .with_model(SourceModel::new("auth", "User", "auth.models")),
            );

        let user = apps.model(&ModelRef::new("auth", "User")).unwrap();
        assert_eq!(user.table_name(), "auth_user");
    }

    #[test]
    fn test_imported_copy_is_used_when_declaring_module_is_absent() {
        let apps = SourceApps::new().with_module(
            SourceModule::new("books.models")
                .with_model(SourceModel::new("auth", "User", "auth.models")),
        );
        assert!(apps.model(&ModelRef::new("auth", "User")).is_some());
        assert!(apps.model(&ModelRef::new("auth", "Group")).is_none());
        assert_eq!(apps.len(), 1);
        assert!(!apps.is_empty());
    }
}
