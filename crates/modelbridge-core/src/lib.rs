pub mod backend;
pub mod schema;
pub mod source;

pub use backend::{Backend, UnknownBackend};
pub use schema::{
    Column, ColumnDefault, ColumnName, ColumnRef, ColumnType, Export, ForeignKey, JoinCondition, Namespace,
    ReferenceAction, Relationship, Table, TableName, TargetClass, TypeArg, TypeCtor, TypeModule,
};
pub use source::{
    ModelCatalog, ModelRef, OnDelete, RelationKind, SourceApps, SourceField, SourceModel,
    SourceModule, SourceRelation,
};
