//! Translation of source model metadata into normalized descriptors.
//!
//! The [`Registry`] maps field classes to per-backend column types, the
//! [`FieldParser`] resolves one field against it (running hooks to a fixed
//! point), and [`parse_model`](FieldParser::parse_model) collects a whole
//! model into a [`ModelDescriptor`].

pub mod defaults;
pub mod descriptor;
pub mod error;
pub mod field;
pub mod hooks;
pub mod model;
pub mod registry;

pub use descriptor::{Direction, FieldDescriptor, ModelDescriptor, RelationDescriptor};
pub use error::MappingError;
pub use field::{FieldParser, MAX_RESOLUTION_STEPS};
pub use hooks::{CustomHook, Hook, HookContext, Resolution};
pub use model::parse_models;
pub use registry::{Fragment, Registry};
