use modelbridge_core::{
    Backend, ForeignKey, ModelCatalog, ModelRef, SourceField, SourceModel, SourceRelation, TypeArg,
    TypeModule,
};
use modelbridge_naming::{default_related_name, split_related_name};

use crate::descriptor::{Direction, RelationDescriptor};
use crate::error::MappingError;
use crate::field::FieldParser;
use crate::registry::{Fragment, Registry};

/// User-supplied hook.
pub type CustomHook =
    fn(&HookContext<'_>, &SourceField, &Fragment) -> Result<Resolution, MappingError>;

/// Deferred mapping step attached to a registry entry.
#[derive(Debug, Clone, Copy)]
pub enum Hook {
    /// Copies `max_length` into every arm as `length`.
    MaxLength,
    /// Copies `max_digits`/`decimal_places` into every arm as `precision`/`scale`.
    Decimal,
    /// Resolves the element field and passes its type as `item_type`.
    Array,
    /// Spatial column of the given geometry type.
    Geometry(&'static str),
    /// Substitutes the referenced field and records the foreign key.
    ForeignKey,
    /// Derives the through-table join keys.
    ManyToMany,
    Custom(CustomHook),
}

/// Outcome of one hook run.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Merge the fragment; resolution continues only if it carries a hook.
    Terminal(Fragment),
    /// Merge the fragment and continue with `field` as the current field.
    Substitute { fragment: Fragment, field: SourceField },
}

/// What a hook can see while resolving a field.
pub struct HookContext<'a> {
    pub parser: &'a FieldParser<'a>,
    /// Model declaring the field being parsed.
    pub model: &'a SourceModel,
}

impl HookContext<'_> {
    pub fn registry(&self) -> &Registry {
        self.parser.registry()
    }

    pub fn catalog(&self) -> &dyn ModelCatalog {
        self.parser.catalog()
    }

    fn lookup_model(&self, key: &ModelRef) -> Result<&SourceModel, MappingError> {
        self.catalog()
            .model(key)
            .ok_or_else(|| MappingError::UnknownModel(key.clone()))
    }

    fn invalid_relation(&self, field: &SourceField, reason: impl Into<String>) -> MappingError {
        MappingError::InvalidRelationConfig {
            model: self.model.key(),
            field: field.name.clone(),
            reason: reason.into(),
        }
    }

    fn invalid_field(&self, field: &SourceField, reason: impl Into<String>) -> MappingError {
        MappingError::InvalidFieldConfig {
            model: self.model.key(),
            field: field.name.clone(),
            reason: reason.into(),
        }
    }
}

impl Hook {
    pub fn resolve(
        self,
        ctx: &HookContext<'_>,
        field: &SourceField,
        accumulated: &Fragment,
    ) -> Result<Resolution, MappingError> {
        match self {
            Hook::MaxLength => Ok(Resolution::Terminal(max_length(field, accumulated))),
            Hook::Decimal => Ok(Resolution::Terminal(decimal(field, accumulated))),
            Hook::Array => array(ctx, field).map(Resolution::Terminal),
            Hook::Geometry(kind) => Ok(Resolution::Terminal(geometry(kind, field, accumulated))),
            Hook::ForeignKey => foreign_key(ctx, field, accumulated),
            Hook::ManyToMany => many_to_many(ctx, field).map(Resolution::Terminal),
            Hook::Custom(hook) => hook(ctx, field, accumulated),
        }
    }
}

fn for_each_arm(accumulated: &Fragment, options: &[(&str, TypeArg)]) -> Fragment {
    let mut fragment = Fragment::new();
    for backend in accumulated.types.keys() {
        for (key, value) in options {
            fragment = fragment.with_type_option(*backend, *key, value.clone());
        }
    }
    fragment
}

/// Sets `length` on every arm except custom types, which take no arguments.
fn max_length(field: &SourceField, accumulated: &Fragment) -> Fragment {
    let Some(length) = field.max_length else {
        return Fragment::new();
    };
    let mut fragment = Fragment::new();
    for (backend, ctor) in &accumulated.types {
        if ctor.module != TypeModule::Custom {
            fragment = fragment.with_type_option(*backend, "length", length);
        }
    }
    fragment
}

fn decimal(field: &SourceField, accumulated: &Fragment) -> Fragment {
    let mut options = Vec::new();
    if let Some(precision) = field.max_digits {
        options.push(("precision", TypeArg::from(precision)));
    }
    if let Some(scale) = field.decimal_places {
        options.push(("scale", TypeArg::from(scale)));
    }
    for_each_arm(accumulated, &options)
}

fn geometry(kind: &'static str, field: &SourceField, accumulated: &Fragment) -> Fragment {
    for_each_arm(
        accumulated,
        &[
            ("geometry_type", TypeArg::from(kind)),
            ("srid", TypeArg::from(field.srid.unwrap_or(4326))),
            ("dimension", TypeArg::from(field.dim.unwrap_or(2))),
            ("spatial_index", TypeArg::from(field.spatial_index.unwrap_or(true))),
        ],
    )
}

fn array(ctx: &HookContext<'_>, field: &SourceField) -> Result<Fragment, MappingError> {
    let base = field
        .base_field
        .as_deref()
        .ok_or_else(|| ctx.invalid_field(field, "array field has no base field"))?;
    let element = ctx.parser.parse_field(ctx.model, base)?;
    let item = element
        .column_type(Backend::Postgresql)
        .ok_or_else(|| ctx.invalid_field(field, "base field has no postgresql type"))?;
    Ok(Fragment::new().with_type_option(Backend::Postgresql, "item_type", item.ctor))
}

fn back_reference(ctx: &HookContext<'_>, relation: &SourceRelation) -> (Option<String>, Direction) {
    match relation.related_name.as_deref() {
        Some(related_name) => {
            let (name, forward_only) = split_related_name(related_name);
            let direction = if forward_only {
                Direction::ForwardOnly
            } else {
                Direction::Bidirectional
            };
            let name = (!name.is_empty()).then(|| name.to_string());
            (name, direction)
        }
        None => (
            Some(default_related_name(&ctx.model.object_name)),
            Direction::Bidirectional,
        ),
    }
}

fn relation_of<'f>(
    ctx: &HookContext<'_>,
    field: &'f SourceField,
) -> Result<&'f SourceRelation, MappingError> {
    field
        .relation
        .as_ref()
        .ok_or_else(|| ctx.invalid_relation(field, "relation metadata is missing"))
}

/// Maps a foreign key like the field it references.
///
/// Only the first hop records the constraint and relationship; a chain of
/// one-to-one primary keys keeps substituting until a plain field is reached.
fn foreign_key(
    ctx: &HookContext<'_>,
    field: &SourceField,
    accumulated: &Fragment,
) -> Result<Resolution, MappingError> {
    let relation = relation_of(ctx, field)?;
    let target = ctx.lookup_model(&relation.to)?;
    let referenced = match relation.to_field.as_deref() {
        Some(name) => target.field(name).ok_or_else(|| {
            ctx.invalid_relation(
                field,
                format!("'{}' has no field '{}'", relation.to, name),
            )
        })?,
        None => target
            .pk()
            .ok_or_else(|| MappingError::MissingPrimaryKey(target.key()))?,
    };
    let entry = ctx
        .registry()
        .lookup(&referenced.class)
        .ok_or_else(|| MappingError::UnmappedFieldType {
            model: target.key(),
            field: referenced.name.clone(),
            class: referenced.class.clone(),
        })?;

    let mut fragment = Fragment {
        types: entry.types.clone(),
        type_options: entry.type_options.clone(),
        hook: entry.hook,
        ..Fragment::default()
    };

    if accumulated.relation.is_none() {
        let target_table = target.table_name();
        let target_column = referenced.attname();
        let ondelete = relation.on_delete.and_then(|action| action.reference_action());
        let (back_reference_name, direction) = back_reference(ctx, relation);
        fragment.foreign_key = Some(ForeignKey::new(&target_table, &target_column, ondelete));
        fragment.relation = Some(RelationDescriptor {
            target_model: relation.to.clone(),
            logical_name: field.name.clone(),
            secondary_model: None,
            target_field: Some(field.attname()),
            remote_primary_field: None,
            remote_secondary_field: None,
            remote_target_field: Some(target_column),
            back_reference_name,
            direction,
            lazy: relation.lazy.clone(),
        });
    }

    Ok(Resolution::Substitute {
        fragment,
        field: referenced.clone(),
    })
}

/// First column-owning relation on `through` pointing at `to`, skipping `exclude`.
fn through_key<'m>(
    through: &'m SourceModel,
    to: &ModelRef,
    exclude: Option<&str>,
) -> Option<&'m SourceField> {
    through.concrete_fields().find(|f| {
        f.relation
            .as_ref()
            .is_some_and(|r| r.kind.has_column() && &r.to == to)
            && Some(f.name.as_str()) != exclude
    })
}

fn many_to_many(ctx: &HookContext<'_>, field: &SourceField) -> Result<Fragment, MappingError> {
    let relation = relation_of(ctx, field)?;
    let through_ref = relation
        .through
        .as_ref()
        .ok_or_else(|| ctx.invalid_relation(field, "many-to-many relation has no through model"))?;
    let through = ctx.lookup_model(through_ref)?;
    let target = ctx.lookup_model(&relation.to)?;

    let source_pk = ctx
        .model
        .pk()
        .ok_or_else(|| MappingError::MissingPrimaryKey(ctx.model.key()))?;
    let target_pk = target
        .pk()
        .ok_or_else(|| MappingError::MissingPrimaryKey(target.key()))?;

    let (primary, secondary) = match &relation.through_fields {
        Some((source_name, target_name)) => {
            let lookup = |name: &str| {
                through.field(name).ok_or_else(|| {
                    ctx.invalid_relation(
                        field,
                        format!("through model '{}' has no field '{}'", through_ref, name),
                    )
                })
            };
            (lookup(source_name)?, lookup(target_name)?)
        }
        None => {
            let source = ctx.model.key();
            let primary = through_key(through, &source, None).ok_or_else(|| {
                ctx.invalid_relation(
                    field,
                    format!("through model '{}' has no key to '{}'", through_ref, source),
                )
            })?;
            let secondary = through_key(through, &relation.to, Some(primary.name.as_str()))
                .ok_or_else(|| {
                    ctx.invalid_relation(
                        field,
                        format!("through model '{}' has no key to '{}'", through_ref, relation.to),
                    )
                })?;
            (primary, secondary)
        }
    };

    let (back_reference_name, direction) = back_reference(ctx, relation);
    let mut fragment = Fragment::new();
    fragment.relation = Some(RelationDescriptor {
        target_model: relation.to.clone(),
        logical_name: field.name.clone(),
        secondary_model: Some(through_ref.clone()),
        target_field: Some(source_pk.attname()),
        remote_primary_field: Some(primary.attname()),
        remote_secondary_field: Some(secondary.attname()),
        remote_target_field: Some(target_pk.attname()),
        back_reference_name,
        direction,
        lazy: relation.lazy.clone(),
    });
    Ok(fragment)
}
