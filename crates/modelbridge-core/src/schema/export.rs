use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::table::{Table, TargetClass};

/// What a transfer publishes under one name: the declarative class itself
/// or only its table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Export {
    Class(TargetClass),
    Table(Table),
}

impl Export {
    pub fn table(&self) -> &Table {
        match self {
            Export::Class(class) => &class.table,
            Export::Table(table) => table,
        }
    }

    pub fn as_class(&self) -> Option<&TargetClass> {
        match self {
            Export::Class(class) => Some(class),
            Export::Table(_) => None,
        }
    }
}

/// Destination namespace of a transfer, in publication order.
pub type Namespace = IndexMap<String, Export>;
