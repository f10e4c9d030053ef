use indexmap::IndexMap;
use tracing::debug;

use modelbridge_config::{BackReferenceStyle, MissingTypePolicy};
use modelbridge_core::{
    Backend, Column, ColumnRef, JoinCondition, ModelCatalog, ModelRef, Relationship, Table,
    TargetClass,
};
use modelbridge_mapping::{FieldParser, ModelDescriptor, Registry, RelationDescriptor};

use crate::error::BuildError;

/// Index of a class in a [`Builder`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(usize);

impl ClassId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A reverse attribute wired onto a class by a relationship of another class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackReference<'a> {
    /// Attribute name on the target class.
    pub name: &'a str,
    /// Class declaring the relationship.
    pub source: &'a str,
    pub relationship: &'a str,
}

/// Declarative builder owning the class arena and the model -> class cache.
///
/// Each source model is built at most once per builder. Cache entries are
/// reserved before a model's relations are visited, so a model reached again
/// while it is still being built resolves to its reserved id.
pub struct Builder<'a> {
    parser: FieldParser<'a>,
    catalog: &'a dyn ModelCatalog,
    policy: MissingTypePolicy,
    classes: Vec<TargetClass>,
    finished: Vec<bool>,
    cache: IndexMap<ModelRef, ClassId>,
}

impl<'a> Builder<'a> {
    pub fn new(registry: &'a Registry, catalog: &'a dyn ModelCatalog) -> Self {
        Self {
            parser: FieldParser::new(registry, catalog),
            catalog,
            policy: MissingTypePolicy::default(),
            classes: Vec::new(),
            finished: Vec::new(),
            cache: IndexMap::new(),
        }
    }

    pub fn with_missing_type_policy(mut self, policy: MissingTypePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn catalog(&self) -> &'a dyn ModelCatalog {
        self.catalog
    }

    pub fn class(&self, id: ClassId) -> &TargetClass {
        &self.classes[id.0]
    }

    pub fn class_for(&self, key: &ModelRef) -> Option<&TargetClass> {
        self.cache.get(key).map(|id| self.class(*id))
    }

    pub fn id_for(&self, key: &ModelRef) -> Option<ClassId> {
        self.cache.get(key).copied()
    }

    /// Built classes in build order.
    pub fn classes(&self) -> impl Iterator<Item = (&ModelRef, &TargetClass)> {
        self.cache.iter().map(|(key, id)| (key, self.class(*id)))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Reverse attributes other classes' relationships wire onto `id`.
    pub fn back_references(&self, id: ClassId) -> Vec<BackReference<'_>> {
        let name = &self.class(id).name;
        self.classes
            .iter()
            .flat_map(|class| {
                class.relationships.values().filter_map(move |rel| {
                    let backref = rel.backref.as_deref()?;
                    (&rel.target == name).then_some(BackReference {
                        name: backref,
                        source: &class.name,
                        relationship: &rel.name,
                    })
                })
            })
            .collect()
    }

    /// Build the target class of `key`, or return the cached one.
    ///
    /// On error every class reserved by this call is discarded, leaving the
    /// builder as it was before.
    pub fn declare(
        &mut self,
        key: &ModelRef,
        backend: Backend,
        style: BackReferenceStyle,
    ) -> Result<ClassId, BuildError> {
        let classes = self.classes.len();
        let cached = self.cache.len();
        let result = self.visit(key, backend, style);
        if result.is_err() {
            self.classes.truncate(classes);
            self.finished.truncate(classes);
            self.cache.truncate(cached);
        }
        result
    }

    fn visit(
        &mut self,
        key: &ModelRef,
        backend: Backend,
        style: BackReferenceStyle,
    ) -> Result<ClassId, BuildError> {
        if let Some(&id) = self.cache.get(key) {
            debug!(model = %key, "class cache hit");
            return Ok(id);
        }

        let catalog = self.catalog;
        let model = catalog
            .model(key)
            .ok_or_else(|| BuildError::UnknownModel(key.clone()))?;
        let descriptor = self.parser.parse_model(model)?;

        let id = ClassId(self.classes.len());
        self.classes
            .push(TargetClass::new(Table::new(descriptor.table_name.clone())));
        self.finished.push(false);
        self.cache.insert(key.clone(), id);
        debug!(model = %key, table = %descriptor.table_name, %backend, "declaring class");

        let table = self.columns(&descriptor, backend)?;
        let mut relationships = IndexMap::new();
        for field in descriptor.fields.values() {
            if let Some(relation) = &field.relation {
                let relationship = self.relationship(&descriptor, &table, relation, backend, style)?;
                relationships.insert(relationship.name.clone(), relationship);
            }
        }

        self.classes[id.0] = TargetClass {
            name: table.name.clone(),
            table,
            relationships,
        };
        self.finished[id.0] = true;
        Ok(id)
    }

    fn columns(&self, descriptor: &ModelDescriptor, backend: Backend) -> Result<Table, BuildError> {
        let mut table = Table::new(descriptor.table_name.clone());
        for field in descriptor.fields.values() {
            if field.relation.as_ref().is_some_and(|r| r.is_many_to_many()) {
                continue;
            }
            let Some(r#type) = field.column_type(backend) else {
                if self.policy.is_strict() {
                    return Err(BuildError::MissingColumnType {
                        model: descriptor.key.clone(),
                        field: field.name.clone(),
                        backend,
                    });
                }
                debug!(model = %descriptor.key, field = %field.name, %backend, "no column type, skipping column");
                continue;
            };

            let mut column = Column::new(field.name.clone(), r#type);
            column.primary_key = field.primary_key.unwrap_or(false);
            column.unique = field.unique.unwrap_or(false);
            column.nullable = field.nullable.unwrap_or(!column.primary_key);
            column.autoincrement = field.autoincrement;
            column.foreign_key = field.foreign_key.clone();
            column.default = field.default.clone();
            table.columns.insert(column.name.clone(), column);
        }
        Ok(table)
    }

    fn relationship(
        &mut self,
        descriptor: &ModelDescriptor,
        table: &Table,
        relation: &RelationDescriptor,
        backend: Backend,
        style: BackReferenceStyle,
    ) -> Result<Relationship, BuildError> {
        let missing = |column: String| BuildError::MissingJoinColumn {
            model: descriptor.key.clone(),
            column,
        };
        let local_name = relation
            .target_field
            .as_deref()
            .ok_or_else(|| missing(format!("{}.<local>", table.name)))?;
        // A foreign-key column skipped for lack of a type leaves the relationship
        // without join hints; a many-to-many relation cannot do without it.
        let local = match table.column(local_name) {
            Some(_) => Some(ColumnRef::new(table.name.clone(), local_name)),
            None if relation.is_many_to_many() => {
                return Err(missing(format!("{}.{}", table.name, local_name)));
            }
            None => None,
        };

        let secondary = match &relation.secondary_model {
            Some(through) => Some(self.visit(through, backend, style)?),
            None => None,
        };
        let target_id = self.visit(&relation.target_model, backend, style)?;
        let target = self.class(target_id);
        let target_table = target.table.name.clone();

        let mut relationship = Relationship::new(relation.logical_name.clone(), target.name.clone());
        let remote_target = relation
            .remote_target_field
            .as_deref()
            .map(|column| ColumnRef::new(target_table.clone(), column));

        match (secondary, local) {
            (Some(through_id), Some(local)) => {
                let through = self.class(through_id);
                let through_done = self.finished[through_id.0];
                let through_column = |name: Option<&str>| {
                    let name = name.unwrap_or_default();
                    if through_done && through.table.column(name).is_none() {
                        return Err(missing(format!("{}.{}", through.table.name, name)));
                    }
                    Ok(ColumnRef::new(through.table.name.clone(), name))
                };
                let remote_primary = through_column(relation.remote_primary_field.as_deref())?;
                let remote_secondary = through_column(relation.remote_secondary_field.as_deref())?;

                relationship.secondary = Some(through.table.name.clone());
                relationship.primary_join = Some(JoinCondition::eq(local, remote_primary));
                relationship.secondary_join =
                    remote_target.map(|remote| JoinCondition::eq(remote_secondary, remote));
            }
            (None, Some(local)) => {
                relationship.foreign_keys = vec![local.clone()];
                relationship.primary_join = remote_target.map(|remote| JoinCondition::eq(local, remote));
            }
            (_, None) => {
                debug!(model = %descriptor.key, column = %local_name, "join column skipped, relationship has no join hints");
            }
        }

        if style.is_enabled() {
            relationship.backref = relation.back_reference().map(str::to_string);
        }
        relationship.lazy = relation.lazy.clone();
        Ok(relationship)
    }
}
