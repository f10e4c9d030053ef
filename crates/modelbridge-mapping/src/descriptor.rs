use indexmap::IndexMap;

use modelbridge_core::{Backend, ColumnDefault, ColumnType, ForeignKey, ModelRef, TypeArg, TypeCtor};

use crate::error::MappingError;

/// Whether a relation gets a reverse attribute on its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Bidirectional,
    /// Declared with a trailing `+` on the related name.
    ForwardOnly,
}

/// Relation metadata of a foreign-key or many-to-many field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationDescriptor {
    pub target_model: ModelRef,
    /// Attribute name of the relationship on the target class.
    pub logical_name: String,
    /// Through model of a many-to-many relation.
    pub secondary_model: Option<ModelRef>,
    /// Local join column.
    pub target_field: Option<String>,
    /// Column on the through table pointing back at the declaring model.
    pub remote_primary_field: Option<String>,
    /// Column on the through table pointing at the target model.
    pub remote_secondary_field: Option<String>,
    /// Column on the target table the relation joins to.
    pub remote_target_field: Option<String>,
    pub back_reference_name: Option<String>,
    pub direction: Direction,
    /// Loading strategy of the relationship.
    pub lazy: Option<String>,
}

impl RelationDescriptor {
    pub fn is_many_to_many(&self) -> bool {
        self.secondary_model.is_some()
    }

    /// Reverse attribute name, unless the relation is forward-only.
    pub fn back_reference(&self) -> Option<&str> {
        match self.direction {
            Direction::Bidirectional => self.back_reference_name.as_deref(),
            Direction::ForwardOnly => None,
        }
    }

    /// Many-to-many relations must know every join column up front.
    pub fn validate(&self, model: &ModelRef, field: &str) -> Result<(), MappingError> {
        if !self.is_many_to_many() {
            return Ok(());
        }
        let required = [
            ("target_field", &self.target_field),
            ("remote_primary_field", &self.remote_primary_field),
            ("remote_secondary_field", &self.remote_secondary_field),
        ];
        for (key, value) in required {
            if value.is_none() {
                return Err(MappingError::InvalidRelationConfig {
                    model: model.clone(),
                    field: field.to_string(),
                    reason: format!("many-to-many relation is missing '{}'", key),
                });
            }
        }
        Ok(())
    }
}

/// Normalized representation of one source field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Attribute name; also the column name.
    pub name: String,
    pub nullable: Option<bool>,
    pub unique: Option<bool>,
    pub primary_key: Option<bool>,
    pub column_types: IndexMap<Backend, TypeCtor>,
    pub column_type_options: IndexMap<Backend, IndexMap<String, TypeArg>>,
    pub autoincrement: Option<bool>,
    pub foreign_key: Option<ForeignKey>,
    pub relation: Option<RelationDescriptor>,
    pub default: Option<ColumnDefault>,
}

impl FieldDescriptor {
    /// Column type for `backend`, falling back to the [`Backend::Default`] arm.
    pub fn column_type(&self, backend: Backend) -> Option<ColumnType> {
        let key = if self.column_types.contains_key(&backend) {
            backend
        } else {
            Backend::Default
        };
        let ctor = self.column_types.get(&key)?;
        Some(ColumnType {
            ctor: ctor.clone(),
            args: self
                .column_type_options
                .get(&key)
                .cloned()
                .unwrap_or_default(),
        })
    }

    pub fn has_column_types(&self) -> bool {
        !self.column_types.is_empty()
    }
}

/// One source model's parse result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub key: ModelRef,
    pub table_name: String,
    /// Plain fields in declaration order, followed by many-to-many fields.
    pub fields: IndexMap<String, FieldDescriptor>,
}

impl ModelDescriptor {
    pub fn relations(&self) -> impl Iterator<Item = (&str, &RelationDescriptor)> {
        self.fields
            .iter()
            .filter_map(|(name, f)| f.relation.as_ref().map(|r| (name.as_str(), r)))
    }
}
