//! Render a published [`Namespace`](modelbridge_core::Namespace) as the
//! Python source of a SQLAlchemy declarative module.

pub mod error;
pub mod sqlalchemy;

pub use error::ExportError;
pub use sqlalchemy::{
    BaseSource, ExportNames, render_base, render_column, render_module, render_namespace,
    render_namespaces, render_relationship,
};
