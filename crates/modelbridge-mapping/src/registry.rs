use indexmap::IndexMap;

use modelbridge_core::{Backend, ForeignKey, TypeArg, TypeCtor};

use crate::defaults;
use crate::descriptor::RelationDescriptor;
use crate::hooks::Hook;

/// A partial mapping result for one field.
///
/// Registry entries are fragments; hook outputs are fragments too and are
/// merged into the accumulated result, later keys winning.
#[derive(Debug, Clone, Default)]
pub struct Fragment {
    pub types: IndexMap<Backend, TypeCtor>,
    pub type_options: IndexMap<Backend, IndexMap<String, TypeArg>>,
    pub autoincrement: Option<bool>,
    pub foreign_key: Option<ForeignKey>,
    pub relation: Option<RelationDescriptor>,
    /// Deferred step that completes the mapping from the field itself.
    pub hook: Option<Hook>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fragment with one constructor per listed backend.
    pub fn typed(arms: &[(Backend, TypeCtor)]) -> Self {
        Self {
            types: arms.iter().cloned().collect(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, backend: Backend, ctor: TypeCtor) -> Self {
        self.types.insert(backend, ctor);
        self
    }

    pub fn with_type_option(
        mut self,
        backend: Backend,
        key: impl Into<String>,
        value: impl Into<TypeArg>,
    ) -> Self {
        self.type_options
            .entry(backend)
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    pub fn with_autoincrement(mut self, autoincrement: bool) -> Self {
        self.autoincrement = Some(autoincrement);
        self
    }

    pub fn with_hook(mut self, hook: Hook) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Overlay `other` on top of `self`.
    ///
    /// Type options are merged per backend, so a hook can add `length` to an
    /// arm without dropping the entry's own options.
    pub fn merge(&mut self, other: Fragment) {
        self.types.extend(other.types);
        for (backend, options) in other.type_options {
            self.type_options.entry(backend).or_default().extend(options);
        }
        if other.autoincrement.is_some() {
            self.autoincrement = other.autoincrement;
        }
        if other.foreign_key.is_some() {
            self.foreign_key = other.foreign_key;
        }
        if other.relation.is_some() {
            self.relation = other.relation;
        }
        if other.hook.is_some() {
            self.hook = other.hook;
        }
    }
}

/// Field class name -> mapping fragment.
///
/// Populated with the built-in table by [`Registry::with_defaults`];
/// extended through [`register`](Registry::register) and
/// [`alias`](Registry::alias) for custom field classes.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: IndexMap<String, Fragment>,
    aliases: IndexMap<String, String>,
}

impl Registry {
    /// A registry with no entries at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        defaults::install(&mut registry);
        registry
    }

    /// Register or replace the entry for `class`.
    pub fn register(&mut self, class: impl Into<String>, fragment: Fragment) {
        self.entries.insert(class.into(), fragment);
    }

    /// Map the custom field class `class` like the registered `like`.
    pub fn alias(&mut self, class: impl Into<String>, like: impl Into<String>) {
        self.aliases.insert(class.into(), like.into());
    }

    pub fn with_aliases(mut self, aliases: &IndexMap<String, String>) -> Self {
        for (class, like) in aliases {
            self.alias(class.clone(), like.clone());
        }
        self
    }

    /// Entry for `class`, looking through one level of aliasing.
    pub fn lookup(&self, class: &str) -> Option<&Fragment> {
        self.entries.get(class).or_else(|| {
            self.aliases
                .get(class)
                .and_then(|like| self.entries.get(like))
        })
    }

    pub fn contains(&self, class: &str) -> bool {
        self.lookup(class).is_some()
    }

    /// Whether `class` maps like a many-to-many field.
    pub fn is_many_to_many(&self, class: &str) -> bool {
        self.lookup(class)
            .is_some_and(|entry| matches!(entry.hook, Some(Hook::ManyToMany)))
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelbridge_core::TypeModule;

    const TEXT: TypeCtor = TypeCtor::new(TypeModule::Types, "TEXT");
    const LONGTEXT: TypeCtor = TypeCtor::new(TypeModule::Mysql, "LONGTEXT");

    #[test]
    fn test_merge_later_wins_and_options_combine() {
        let mut base = Fragment::typed(&[(Backend::Default, TEXT)])
            .with_type_option(Backend::Default, "collation", "C")
            .with_autoincrement(true);
        base.merge(
            Fragment::new()
                .with_type(Backend::Mysql, LONGTEXT)
                .with_type_option(Backend::Default, "length", 10_u32),
        );

        assert_eq!(base.types[&Backend::Default], TEXT);
        assert_eq!(base.types[&Backend::Mysql], LONGTEXT);
        let options = &base.type_options[&Backend::Default];
        assert_eq!(options["collation"], TypeArg::Str("C".into()));
        assert_eq!(options["length"], TypeArg::Int(10));
        assert_eq!(base.autoincrement, Some(true));
        assert!(base.hook.is_none());
    }

    #[test]
    fn test_lookup_through_alias() {
        let mut registry = Registry::empty();
        registry.register("TextField", Fragment::typed(&[(Backend::Default, TEXT)]));
        let registry = registry.with_aliases(&IndexMap::from([(
            "MarkdownField".to_string(),
            "TextField".to_string(),
        )]));

        assert!(registry.contains("TextField"));
        assert!(registry.contains("MarkdownField"));
        assert!(!registry.contains("CharField"));
        assert_eq!(
            registry.lookup("MarkdownField").map(|f| f.types[&Backend::Default].clone()),
            Some(TEXT)
        );
    }

    #[test]
    fn test_register_replaces_entry() {
        let mut registry = Registry::with_defaults();
        registry.register("TextField", Fragment::typed(&[(Backend::Mysql, LONGTEXT)]));
        let entry = registry.lookup("TextField").unwrap();
        assert_eq!(entry.types.len(), 1);
    }

    #[test]
    fn test_many_to_many_detection_follows_aliases() {
        let mut registry = Registry::with_defaults();
        registry.alias("SortedManyToManyField", "ManyToManyField");
        assert!(registry.is_many_to_many("ManyToManyField"));
        assert!(registry.is_many_to_many("SortedManyToManyField"));
        assert!(!registry.is_many_to_many("ForeignKey"));
        assert!(!registry.is_many_to_many("UnknownField"));
    }
}
