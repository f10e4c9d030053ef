use modelbridge_core::ModelRef;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("field '{model}.{field}' has unmapped field class '{class}'")]
    UnmappedFieldType {
        model: ModelRef,
        field: String,
        class: String,
    },
    #[error("invalid relation config on '{model}.{field}': {reason}")]
    InvalidRelationConfig {
        model: ModelRef,
        field: String,
        reason: String,
    },
    #[error("invalid field config on '{model}.{field}': {reason}")]
    InvalidFieldConfig {
        model: ModelRef,
        field: String,
        reason: String,
    },
    #[error("unknown model: {0}")]
    UnknownModel(ModelRef),
    #[error("model '{0}' has no primary key")]
    MissingPrimaryKey(ModelRef),
    #[error("field '{model}.{field}' did not resolve within {limit} steps")]
    ResolutionLimit {
        model: ModelRef,
        field: String,
        limit: usize,
    },
}
