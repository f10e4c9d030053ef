use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::{
    column::Column,
    names::{ColumnName, TableName},
    relationship::Relationship,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct Table {
    pub name: TableName,
    pub columns: IndexMap<ColumnName, Column>,
}

impl Table {
    pub fn new(name: impl Into<TableName>) -> Self {
        Self {
            name: name.into(),
            columns: IndexMap::new(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn primary_key(&self) -> impl Iterator<Item = &Column> {
        self.columns.values().filter(|c| c.primary_key)
    }
}

/// A synthesized declarative class: its table plus relationship attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct TargetClass {
    pub name: String,
    pub table: Table,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub relationships: IndexMap<String, Relationship>,
}

impl TargetClass {
    /// Classes are named after the table they map.
    pub fn new(table: Table) -> Self {
        Self {
            name: table.name.clone(),
            table,
            relationships: IndexMap::new(),
        }
    }

    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.get(name)
    }

    /// Attribute names in declaration order: columns first, then relationships.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.table
            .columns
            .keys()
            .chain(self.relationships.keys())
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::column_type::{TypeCtor, TypeModule};

    #[test]
    fn test_attribute_names_order() {
        let ty = TypeCtor::new(TypeModule::Types, "INTEGER");
        let mut table = Table::new("sales");
        let mut id = Column::new("id", ty.call());
        id.primary_key = true;
        table.columns.insert("id".into(), id);
        table.columns.insert("book_id".into(), Column::new("book_id", ty.call()));
        let mut class = TargetClass::new(table);
        class
            .relationships
            .insert("book".into(), Relationship::new("book", "book"));

        assert_eq!(class.name, "sales");
        assert_eq!(class.attribute_names(), vec!["id", "book_id", "book"]);
        let pk: Vec<_> = class.table.primary_key().map(|c| c.name.as_str()).collect();
        assert_eq!(pk, vec!["id"]);
    }
}
