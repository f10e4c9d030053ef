use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::names::{ColumnName, TableName};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ColumnRef {
    pub table: TableName,
    pub column: ColumnName,
}

impl ColumnRef {
    pub fn new(table: impl Into<TableName>, column: impl Into<ColumnName>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// Equality predicate `left == right` between two columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct JoinCondition {
    pub left: ColumnRef,
    pub right: ColumnRef,
}

impl JoinCondition {
    pub fn eq(left: ColumnRef, right: ColumnRef) -> Self {
        Self { left, right }
    }

    /// True when the predicate equates `a` and `b`, in either order.
    pub fn joins(&self, a: &ColumnRef, b: &ColumnRef) -> bool {
        (&self.left == a && &self.right == b) || (&self.left == b && &self.right == a)
    }
}

impl fmt::Display for JoinCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} == {}", self.left, self.right)
    }
}

/// Relationship attribute on a target class.
///
/// The target is named by class name and resolved lazily by the target
/// toolkit, which lets mutually referencing classes point at each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct Relationship {
    pub name: String,
    pub target: String,
    /// Association table of a many-to-many relationship.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<TableName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_join: Option<JoinCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_join: Option<JoinCondition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<ColumnRef>,
    /// Name of the reverse attribute created on the target class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backref: Option<String>,
    /// Loading strategy, e.g. `joined` or `selectin`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lazy: Option<String>,
}

impl Relationship {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            secondary: None,
            primary_join: None,
            secondary_join: None,
            foreign_keys: Vec::new(),
            backref: None,
            lazy: None,
        }
    }

    pub fn is_many_to_many(&self) -> bool {
        self.secondary.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_display() {
        let join = JoinCondition::eq(
            ColumnRef::new("book", "id"),
            ColumnRef::new("book_category", "book_id"),
        );
        assert_eq!(join.to_string(), "book.id == book_category.book_id");
    }

    #[test]
    fn test_joins_is_symmetric() {
        let a = ColumnRef::new("book_category", "category_id");
        let b = ColumnRef::new("category", "id");
        let join = JoinCondition::eq(a.clone(), b.clone());
        assert!(join.joins(&a, &b));
        assert!(join.joins(&b, &a));
        assert!(!join.joins(&a, &ColumnRef::new("category", "name")));
    }
}
