use std::fmt;

use tracing::info;

use modelbridge_config::{NameCase, TransferOptions};
use modelbridge_core::{Export, Namespace, SourceModule};
use modelbridge_mapping::parse_models;

use crate::builder::Builder;
use crate::error::BuildError;

/// Names published classes after their source model.
#[derive(Clone, Copy)]
pub enum NameFormatter {
    Case(NameCase),
    Custom(fn(&str) -> String),
}

impl NameFormatter {
    pub fn format(&self, name: &str) -> String {
        match self {
            NameFormatter::Case(case) => case.apply(name),
            NameFormatter::Custom(format) => format(name),
        }
    }
}

impl Default for NameFormatter {
    fn default() -> Self {
        NameFormatter::Case(NameCase::default())
    }
}

impl From<NameCase> for NameFormatter {
    fn from(case: NameCase) -> Self {
        NameFormatter::Case(case)
    }
}

impl fmt::Debug for NameFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameFormatter::Case(case) => f.debug_tuple("Case").field(case).finish(),
            NameFormatter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Build every concrete model of `module` and publish the ones it declares.
///
/// Models only imported into `module` are still built, so relation targets
/// exist, but they are published by their own module's transfer. Export
/// names come from `formatter`, or from `options.name_case` when it is `None`.
pub fn transfer(
    builder: &mut Builder<'_>,
    module: &SourceModule,
    namespace: &mut Namespace,
    options: &TransferOptions,
    formatter: Option<&NameFormatter>,
    engine: Option<&str>,
) -> Result<(), BuildError> {
    let backend = options.backend.resolve(engine);
    let formatter = formatter.copied().unwrap_or(NameFormatter::Case(options.name_case));
    for model in parse_models(module).values() {
        builder.declare(&model.key(), backend, options.back_reference)?;
    }

    let catalog = builder.catalog();
    for (key, class) in builder.classes() {
        let declared_here = catalog
            .model(key)
            .is_some_and(|model| model.module == module.name);
        if !declared_here {
            continue;
        }

        let name = formatter.format(&key.object_name);
        info!(module = %module.name, model = %key, export = %name, as_table = options.as_table, "publishing");
        let export = if options.as_table {
            Export::Table(class.table.clone())
        } else {
            Export::Class(class.clone())
        };
        namespace.insert(name, export);
    }
    Ok(())
}
