use indexmap::IndexMap;
use tracing::trace;

use modelbridge_core::{SourceModel, SourceModule};

use crate::descriptor::ModelDescriptor;
use crate::error::MappingError;
use crate::field::FieldParser;

impl FieldParser<'_> {
    /// Parse every field of `model`: persisted fields in declaration order,
    /// then many-to-many fields.
    pub fn parse_model(&self, model: &SourceModel) -> Result<ModelDescriptor, MappingError> {
        let (many_to_many, plain): (Vec<_>, Vec<_>) = model
            .fields
            .iter()
            .partition(|f| self.registry().is_many_to_many(&f.class));

        let mut fields = IndexMap::with_capacity(model.fields.len());
        for field in plain.into_iter().chain(many_to_many) {
            let descriptor = self.parse_field(model, field)?;
            trace!(model = %model.key(), field = %descriptor.name, "parsed field");
            fields.insert(descriptor.name.clone(), descriptor);
        }

        Ok(ModelDescriptor {
            key: model.key(),
            table_name: model.table_name(),
            fields,
        })
    }
}

/// Concrete models visible in `module`, declared or imported, by name.
pub fn parse_models(module: &SourceModule) -> IndexMap<String, &SourceModel> {
    module
        .models
        .iter()
        .filter(|m| !m.is_abstract)
        .map(|m| (m.object_name.clone(), m))
        .collect()
}
