use std::borrow::Cow;

use modelbridge_core::{ModelCatalog, SourceField, SourceModel};

use crate::descriptor::FieldDescriptor;
use crate::error::MappingError;
use crate::hooks::{HookContext, Resolution};
use crate::registry::Registry;

/// Upper bound on hook runs for a single field.
pub const MAX_RESOLUTION_STEPS: usize = 16;

/// Resolves source fields against a [`Registry`].
#[derive(Clone, Copy)]
pub struct FieldParser<'a> {
    registry: &'a Registry,
    catalog: &'a dyn ModelCatalog,
}

impl<'a> FieldParser<'a> {
    pub fn new(registry: &'a Registry, catalog: &'a dyn ModelCatalog) -> Self {
        Self { registry, catalog }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn catalog(&self) -> &'a dyn ModelCatalog {
        self.catalog
    }

    /// Map one field of `model`.
    ///
    /// Starts from the registry entry of the field's class, then runs hooks
    /// until none is left. A hook may substitute another field (a foreign key
    /// resolves like the field it references), in which case later hooks see
    /// the substitute.
    pub fn parse_field(
        &self,
        model: &SourceModel,
        field: &SourceField,
    ) -> Result<FieldDescriptor, MappingError> {
        let mut info = self
            .registry
            .lookup(&field.class)
            .cloned()
            .ok_or_else(|| MappingError::UnmappedFieldType {
                model: model.key(),
                field: field.name.clone(),
                class: field.class.clone(),
            })?;

        let ctx = HookContext {
            parser: self,
            model,
        };
        let mut current = Cow::Borrowed(field);
        let mut steps = 0;
        while let Some(hook) = info.hook.take() {
            steps += 1;
            if steps > MAX_RESOLUTION_STEPS {
                return Err(MappingError::ResolutionLimit {
                    model: model.key(),
                    field: field.name.clone(),
                    limit: MAX_RESOLUTION_STEPS,
                });
            }
            match hook.resolve(&ctx, &current, &info)? {
                Resolution::Terminal(fragment) => info.merge(fragment),
                Resolution::Substitute {
                    fragment,
                    field: next,
                } => {
                    info.merge(fragment);
                    current = Cow::Owned(next);
                }
            }
        }

        if let Some(relation) = &info.relation {
            relation.validate(&model.key(), &field.name)?;
        }

        Ok(FieldDescriptor {
            name: field.attname(),
            nullable: field.null,
            unique: field.unique,
            primary_key: field.primary_key,
            column_types: info.types,
            column_type_options: info.type_options,
            autoincrement: info.autoincrement,
            foreign_key: info.foreign_key,
            relation: info.relation,
            default: field.default.clone(),
        })
    }
}
