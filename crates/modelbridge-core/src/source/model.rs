use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use modelbridge_naming::default_table_name;

use crate::source::field::SourceField;

/// Identity of a source model: `app_label.ObjectName`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelRef {
    pub app_label: String,
    pub object_name: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid model reference '{0}': expected 'app_label.ModelName'")]
pub struct ParseModelRefError(pub String);

impl ModelRef {
    pub fn new(app_label: impl Into<String>, object_name: impl Into<String>) -> Self {
        Self {
            app_label: app_label.into(),
            object_name: object_name.into(),
        }
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.app_label, self.object_name)
    }
}

impl FromStr for ModelRef {
    type Err = ParseModelRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once('.') {
            Some((app, object)) if !app.is_empty() && !object.is_empty() => {
                Ok(ModelRef::new(app, object))
            }
            _ => Err(ParseModelRefError(s.to_string())),
        }
    }
}

impl TryFrom<String> for ModelRef {
    type Error = ParseModelRefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModelRef> for String {
    fn from(value: ModelRef) -> Self {
        value.to_string()
    }
}

#[cfg(feature = "schema")]
impl schemars::JsonSchema for ModelRef {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "ModelRef".into()
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        String::json_schema(generator)
    }
}

/// A source model class and its declared fields, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct SourceModel {
    pub app_label: String,
    pub object_name: String,
    /// Module the model is declared in, e.g. `books.models`.
    #[serde(default)]
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_table: Option<String>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub fields: Vec<SourceField>,
}

impl SourceModel {
    pub fn new(
        app_label: impl Into<String>,
        object_name: impl Into<String>,
        module: impl Into<String>,
    ) -> Self {
        Self {
            app_label: app_label.into(),
            object_name: object_name.into(),
            module: module.into(),
            db_table: None,
            is_abstract: false,
            fields: Vec::new(),
        }
    }

    pub fn with_db_table(mut self, db_table: impl Into<String>) -> Self {
        self.db_table = Some(db_table.into());
        self
    }

    pub fn with_field(mut self, field: SourceField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn key(&self) -> ModelRef {
        ModelRef::new(&self.app_label, &self.object_name)
    }

    pub fn table_name(&self) -> String {
        match &self.db_table {
            Some(table) => table.clone(),
            None => default_table_name(&self.app_label, &self.object_name),
        }
    }

    pub fn pk(&self) -> Option<&SourceField> {
        self.fields.iter().find(|f| f.is_primary_key())
    }

    /// Look a field up by name or attribute name.
    pub fn field(&self, name: &str) -> Option<&SourceField> {
        self.fields
            .iter()
            .find(|f| f.name == name || f.attname() == name)
    }

    /// Persisted fields, in declaration order.
    pub fn concrete_fields(&self) -> impl Iterator<Item = &SourceField> {
        self.fields.iter().filter(|f| !f.is_many_to_many())
    }

    pub fn many_to_many_fields(&self) -> impl Iterator<Item = &SourceField> {
        self.fields.iter().filter(|f| f.is_many_to_many())
    }
}

/// The namespace of one source module: the models declared in it plus any
/// imported from elsewhere (whose `module` differs from `name`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct SourceModule {
    pub name: String,
    #[serde(default)]
    pub models: Vec<SourceModel>,
}

impl SourceModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            models: Vec::new(),
        }
    }

    pub fn with_model(mut self, model: SourceModel) -> Self {
        self.models.push(model);
        self
    }

    /// Models declared in this module, excluding imported ones.
    pub fn declared_models(&self) -> impl Iterator<Item = &SourceModel> {
        self.models.iter().filter(|m| m.module == self.name)
    }
}
