pub mod builder;
pub mod error;
pub mod transfer;

#[cfg(test)]
mod fixtures;

pub use builder::{BackReference, Builder, ClassId};
pub use error::BuildError;
pub use transfer::{NameFormatter, transfer};
