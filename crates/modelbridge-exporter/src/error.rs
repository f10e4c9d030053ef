use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("'{0}' is not a valid Python identifier")]
    InvalidIdentifier(String),
    #[error("'{0}' is a Python keyword and cannot name an export")]
    ReservedName(String),
}
