pub mod column;
pub mod column_type;
pub mod default;
pub mod export;
pub mod names;
pub mod reference;
pub mod relationship;
pub mod table;

pub use column::{Column, ForeignKey};
pub use column_type::{ColumnType, TypeArg, TypeCtor, TypeModule};
pub use default::ColumnDefault;
pub use export::{Export, Namespace};
pub use names::{ColumnName, TableName};
pub use reference::ReferenceAction;
pub use relationship::{ColumnRef, JoinCondition, Relationship};
pub use table::{Table, TargetClass};
