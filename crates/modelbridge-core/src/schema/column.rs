use serde::{Deserialize, Serialize};

use crate::schema::{
    column_type::ColumnType, default::ColumnDefault, names::ColumnName, reference::ReferenceAction,
};

/// Foreign-key constraint attached to a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct ForeignKey {
    /// Referenced column as `table.column`.
    pub column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ondelete: Option<ReferenceAction>,
}

impl ForeignKey {
    pub fn new(table: &str, column: &str, ondelete: Option<ReferenceAction>) -> Self {
        Self {
            column: format!("{}.{}", table, column),
            ondelete,
        }
    }

    /// Split the reference into `(table, column)`.
    pub fn target(&self) -> Option<(&str, &str)> {
        self.column.rsplit_once('.')
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct Column {
    pub name: ColumnName,
    pub r#type: ColumnType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKey>,
    pub primary_key: bool,
    pub unique: bool,
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoincrement: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ColumnDefault>,
}

impl Column {
    /// A column with the target toolkit's defaults: not a key, not unique,
    /// nullable.
    pub fn new(name: impl Into<ColumnName>, r#type: ColumnType) -> Self {
        Self {
            name: name.into(),
            r#type,
            foreign_key: None,
            primary_key: false,
            unique: false,
            nullable: true,
            autoincrement: None,
            default: None,
        }
    }
}
