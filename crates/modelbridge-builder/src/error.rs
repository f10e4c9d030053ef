use modelbridge_core::{Backend, ModelRef};
use modelbridge_mapping::MappingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error("unknown model: {0}")]
    UnknownModel(ModelRef),
    #[error("relation on '{model}' joins on missing column '{column}'")]
    MissingJoinColumn { model: ModelRef, column: String },
    #[error("field '{model}.{field}' has no column type for backend '{backend}'")]
    MissingColumnType {
        model: ModelRef,
        field: String,
        backend: Backend,
    },
}
