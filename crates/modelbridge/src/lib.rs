//! Translate source model metadata into target declarative schemas.
//!
//! ```
//! use modelbridge::{Builder, Namespace, Registry, TransferOptions, transfer};
//! use modelbridge::{SourceApps, SourceField, SourceModel, SourceModule};
//!
//! let apps = SourceApps::new().with_module(
//!     SourceModule::new("polls.models").with_model(
//!         SourceModel::new("polls", "Question", "polls.models")
//!             .with_field(SourceField::new("id", "AutoField").with_primary_key(true))
//!             .with_field(SourceField::new("text", "CharField").with_max_length(200)),
//!     ),
//! );
//! let registry = Registry::with_defaults();
//! let mut builder = Builder::new(&registry, &apps);
//! let mut namespace = Namespace::new();
//! transfer(
//!     &mut builder,
//!     apps.module("polls.models").unwrap(),
//!     &mut namespace,
//!     &TransferOptions::default(),
//!     None,
//!     None,
//! )
//! .unwrap();
//!
//! assert_eq!(namespace["Question"].table().name, "polls_question");
//! ```

pub use modelbridge_builder::{BackReference, BuildError, Builder, ClassId, NameFormatter, transfer};
pub use modelbridge_config::{
    AutoloadConfig, BackReferenceStyle, BackendSelector, BridgeConfig, MissingTypePolicy,
    NameCase, TransferOptions,
};
pub use modelbridge_core::{
    Backend, Column, ColumnDefault, ColumnRef, ColumnType, Export, ForeignKey, JoinCondition, ModelCatalog,
    ModelRef, Namespace, OnDelete, ReferenceAction, RelationKind, Relationship, SourceApps,
    SourceField, SourceModel, SourceModule, SourceRelation, Table, TargetClass, TypeArg, TypeCtor,
    TypeModule,
};
pub use modelbridge_exporter::{
    BaseSource, ExportError, render_base, render_namespace, render_namespaces,
};
pub use modelbridge_loader::{autoload, load_apps, load_config_or_default, load_module};
pub use modelbridge_mapping::{
    FieldDescriptor, FieldParser, Fragment, Hook, MappingError, ModelDescriptor, Registry,
    RelationDescriptor,
};

pub mod naming {
    pub use modelbridge_naming::*;
}
