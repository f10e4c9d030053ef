use serde::{Deserialize, Serialize};

use modelbridge_naming::relation_attname;

use crate::schema::ColumnDefault;
use crate::source::relation::{RelationKind, SourceRelation};

/// One declared field of a source model, as exposed by the source
/// framework's metadata API.
///
/// Every flag is optional: a field class that does not define a flag leaves
/// it unset and the target column falls back to its own defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct SourceField {
    pub name: String,
    /// Attribute name on the model instance; see [`SourceField::attname`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attname: Option<String>,
    /// Field class name, e.g. `CharField`.
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_digits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_places: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dim: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_index: Option<bool>,
    /// Element field of array fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_field: Option<Box<SourceField>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<SourceRelation>,
    /// Value or callable the column is filled with when none is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ColumnDefault>,
}

impl SourceField {
    pub fn new(name: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attname: None,
            class: class.into(),
            primary_key: None,
            unique: None,
            null: None,
            max_length: None,
            max_digits: None,
            decimal_places: None,
            srid: None,
            dim: None,
            spatial_index: None,
            base_field: None,
            relation: None,
            default: None,
        }
    }

    /// Attribute name the field is stored under.
    ///
    /// Defaults to the field name, with an `_id` suffix for relations that
    /// own a local column.
    pub fn attname(&self) -> String {
        if let Some(attname) = &self.attname {
            return attname.clone();
        }
        match &self.relation {
            Some(relation) if relation.kind.has_column() => relation_attname(&self.name),
            _ => self.name.clone(),
        }
    }

    pub fn is_many_to_many(&self) -> bool {
        self.relation
            .as_ref()
            .is_some_and(|r| r.kind == RelationKind::ManyToMany)
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key == Some(true)
    }

    pub fn with_primary_key(mut self, primary_key: bool) -> Self {
        self.primary_key = Some(primary_key);
        self
    }

    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = Some(unique);
        self
    }

    pub fn with_null(mut self, null: bool) -> Self {
        self.null = Some(null);
        self
    }

    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_decimal(mut self, max_digits: u32, decimal_places: u32) -> Self {
        self.max_digits = Some(max_digits);
        self.decimal_places = Some(decimal_places);
        self
    }

    pub fn with_base_field(mut self, base_field: SourceField) -> Self {
        self.base_field = Some(Box::new(base_field));
        self
    }

    pub fn with_relation(mut self, relation: SourceRelation) -> Self {
        self.relation = Some(relation);
        self
    }

    pub fn with_default(mut self, default: impl Into<ColumnDefault>) -> Self {
        self.default = Some(default.into());
        self
    }
}
