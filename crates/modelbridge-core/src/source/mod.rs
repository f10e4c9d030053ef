pub mod catalog;
pub mod field;
pub mod model;
pub mod relation;

pub use catalog::{ModelCatalog, SourceApps};
pub use field::SourceField;
pub use model::{ModelRef, ParseModelRefError, SourceModel, SourceModule};
pub use relation::{OnDelete, RelationKind, SourceRelation};
