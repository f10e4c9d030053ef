use std::collections::BTreeSet;

use indexmap::IndexMap;

use modelbridge_core::{
    Column, ColumnDefault, ColumnRef, Export, Namespace, Relationship, Table, TargetClass,
};

use crate::error::ExportError;

mod types;

pub use types::render_type;

use types::{UsedModules, is_identifier, is_keyword, render_string};

/// How a table is reachable from the rendered module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Published<'a> {
    Class(&'a str),
    Table(&'a str),
}

/// Table name -> export it was published under.
///
/// Built over every namespace rendered against the same declarative base, so
/// relationships into another module resolve to that module's class names.
#[derive(Debug, Default)]
pub struct ExportNames<'a> {
    tables: IndexMap<&'a str, Published<'a>>,
}

impl<'a> ExportNames<'a> {
    pub fn new(namespace: &'a Namespace) -> Self {
        let mut names = Self::default();
        names.extend(namespace);
        names
    }

    /// Add the exports of `namespace`; tables already known keep their name.
    pub fn extend(&mut self, namespace: &'a Namespace) {
        for (name, export) in namespace {
            let (table, published) = match export {
                Export::Class(class) => (class.table.name.as_str(), Published::Class(name.as_str())),
                Export::Table(table) => (table.name.as_str(), Published::Table(name.as_str())),
            };
            self.tables.entry(table).or_insert(published);
        }
    }

    /// Python expression for a column, e.g. `Book.author_id` or `books_book.c.author_id`.
    fn column(&self, column: &ColumnRef) -> String {
        match self.tables.get(column.table.as_str()) {
            Some(Published::Class(name)) => format!("{}.{}", name, attribute_name(&column.column)),
            Some(Published::Table(name)) => format!("{}.c.{}", name, column.column),
            None => format!("{}.c.{}", column.table, column.column),
        }
    }

    /// Class name a relationship target resolves to.
    fn class<'n>(&'n self, target: &'n str) -> &'n str {
        match self.tables.get(target) {
            Some(Published::Class(name)) => *name,
            _ => target,
        }
    }
}

/// Where a rendered module gets its declarative base from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseSource<'a> {
    /// Declare a private `Base` in the module itself.
    Declare,
    /// Import `Base` from a shared module, e.g. `models_base`.
    Import(&'a str),
}

/// Attribute a column is mapped to on its class; keywords get a trailing underscore.
fn attribute_name(column: &str) -> String {
    if is_keyword(column) {
        format!("{}_", column)
    } else {
        column.to_string()
    }
}

fn check_export_name(name: &str) -> Result<(), ExportError> {
    if is_keyword(name) {
        return Err(ExportError::ReservedName(name.to_string()));
    }
    if !is_identifier(name) {
        return Err(ExportError::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}

fn check_attribute(name: &str) -> Result<(), ExportError> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(ExportError::InvalidIdentifier(name.to_string()))
    }
}

fn check_dotted_path(path: &str) -> Result<(), ExportError> {
    if path.split('.').all(|part| is_identifier(part) && !is_keyword(part)) {
        Ok(())
    } else {
        Err(ExportError::InvalidIdentifier(path.to_string()))
    }
}

fn render_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn render_default(default: &ColumnDefault) -> String {
    match default {
        ColumnDefault::Bool(value) => render_bool(*value).to_string(),
        ColumnDefault::Int(value) => value.to_string(),
        ColumnDefault::Str(value) => render_string(value),
        ColumnDefault::Callable { callable } => callable.clone(),
    }
}

/// Render a `Column(...)` constructor.
///
/// Flags are only emitted where they differ from the toolkit defaults
/// (nullable unless part of the primary key).
pub fn render_column(column: &Column) -> String {
    let mut parts = vec![render_string(&column.name), render_type(&column.r#type)];

    if let Some(fk) = &column.foreign_key {
        let mut foreign_key = format!("ForeignKey({}", render_string(&fk.column));
        if let Some(action) = fk.ondelete {
            foreign_key.push_str(&format!(", ondelete={}", render_string(action.as_sql())));
        }
        foreign_key.push(')');
        parts.push(foreign_key);
    }
    if let Some(default) = &column.default {
        parts.push(format!("default={}", render_default(default)));
    }
    if column.primary_key {
        parts.push("primary_key=True".into());
    }
    if column.unique {
        parts.push("unique=True".into());
    }
    if column.nullable == column.primary_key {
        parts.push(format!("nullable={}", render_bool(column.nullable)));
    }
    if let Some(autoincrement) = column.autoincrement {
        parts.push(format!("autoincrement={}", render_bool(autoincrement)));
    }

    format!("Column({})", parts.join(", "))
}

/// Render a `relationship(...)` call; join predicates are lazy strings.
pub fn render_relationship(relationship: &Relationship, names: &ExportNames<'_>) -> String {
    let mut parts = vec![render_string(names.class(&relationship.target))];

    if let Some(secondary) = &relationship.secondary {
        parts.push(format!("secondary={}", render_string(secondary)));
    }
    if let Some(join) = &relationship.primary_join {
        let expr = format!("{} == {}", names.column(&join.left), names.column(&join.right));
        parts.push(format!("primaryjoin={}", render_string(&expr)));
    }
    if let Some(join) = &relationship.secondary_join {
        let expr = format!("{} == {}", names.column(&join.left), names.column(&join.right));
        parts.push(format!("secondaryjoin={}", render_string(&expr)));
    }
    if !relationship.foreign_keys.is_empty() {
        let keys = relationship
            .foreign_keys
            .iter()
            .map(|key| names.column(key))
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("foreign_keys={}", render_string(&format!("[{}]", keys))));
    }
    if let Some(backref) = &relationship.backref {
        parts.push(format!("backref={}", render_string(backref)));
    }
    if let Some(lazy) = &relationship.lazy {
        parts.push(format!("lazy={}", render_string(lazy)));
    }

    format!("relationship({})", parts.join(", "))
}

fn render_class(
    lines: &mut Vec<String>,
    name: &str,
    class: &TargetClass,
    names: &ExportNames<'_>,
) -> Result<(), ExportError> {
    lines.push(format!("class {}(Base):", name));
    lines.push(format!("    __tablename__ = {}", render_string(&class.table.name)));
    lines.push(String::new());

    for column in class.table.columns.values() {
        check_attribute(&column.name)?;
        lines.push(format!(
            "    {} = {}",
            attribute_name(&column.name),
            render_column(column)
        ));
    }
    for (attribute, relationship) in &class.relationships {
        check_export_name(attribute)?;
        lines.push(format!(
            "    {} = {}",
            attribute,
            render_relationship(relationship, names)
        ));
    }
    Ok(())
}

fn render_table(lines: &mut Vec<String>, name: &str, table: &Table) {
    lines.push(format!("{} = Table(", name));
    lines.push(format!("    {},", render_string(&table.name)));
    lines.push("    Base.metadata,".into());
    for column in table.columns.values() {
        lines.push(format!("    {},", render_column(column)));
    }
    lines.push(")".into());
}

/// The shared module every [`BaseSource::Import`] module imports `Base` from.
pub fn render_base() -> String {
    "from sqlalchemy.orm import declarative_base\n\nBase = declarative_base()\n".to_string()
}

/// Render every export of `namespace` as one Python module.
///
/// Targets are resolved through `names`; pass one built over all modules
/// sharing `base` so cross-module relationships name the right classes.
pub fn render_module(
    namespace: &Namespace,
    names: &ExportNames<'_>,
    base: BaseSource<'_>,
) -> Result<String, ExportError> {
    let mut used = UsedModules::default();
    let mut callables = BTreeSet::new();
    let mut sa_imports = vec!["Column"];
    let mut needs_relationship = false;
    for (name, export) in namespace {
        check_export_name(name)?;
        let table = export.table();
        for column in table.columns.values() {
            used.add_type(&column.r#type);
            if column.foreign_key.is_some() && !sa_imports.contains(&"ForeignKey") {
                sa_imports.push("ForeignKey");
            }
            if let Some(ColumnDefault::Callable { callable }) = &column.default {
                check_dotted_path(callable)?;
            }
            callables.extend(column.default.as_ref().and_then(ColumnDefault::module));
        }
        match export {
            Export::Class(class) => needs_relationship |= !class.relationships.is_empty(),
            Export::Table(_) => {
                if !sa_imports.contains(&"Table") {
                    sa_imports.push("Table");
                }
            }
        }
    }
    if used.uses_generic_types() {
        sa_imports.push("types");
    }
    sa_imports.sort_unstable();

    let mut lines: Vec<String> = Vec::new();
    if !callables.is_empty() {
        lines.extend(callables.iter().map(|module| format!("import {}", module)));
        lines.push(String::new());
    }
    lines.push(format!("from sqlalchemy import {}", sa_imports.join(", ")));
    lines.extend(used.import_lines());
    match base {
        BaseSource::Declare => {
            if needs_relationship {
                lines.push("from sqlalchemy.orm import declarative_base, relationship".into());
            } else {
                lines.push("from sqlalchemy.orm import declarative_base".into());
            }
            lines.push(String::new());
            lines.push("Base = declarative_base()".into());
        }
        BaseSource::Import(module) => {
            check_dotted_path(module)?;
            if needs_relationship {
                lines.push("from sqlalchemy.orm import relationship".into());
            }
            lines.push(format!("from {} import Base", module));
        }
    }

    for (name, export) in namespace {
        lines.push(String::new());
        lines.push(String::new());
        match export {
            Export::Class(class) => render_class(&mut lines, name, class, names)?,
            Export::Table(table) => render_table(&mut lines, name, table),
        }
    }
    lines.push(String::new());

    Ok(lines.join("\n"))
}

/// Render a standalone module with its own `Base`.
pub fn render_namespace(namespace: &Namespace) -> Result<String, ExportError> {
    render_module(namespace, &ExportNames::new(namespace), BaseSource::Declare)
}

/// Render every namespace against one `Base` imported from `base_module`.
///
/// Each module's relationships and foreign keys may point into any other,
/// e.g. the modules produced by one autoload run.
pub fn render_namespaces(
    namespaces: &IndexMap<String, Namespace>,
    base_module: &str,
) -> Result<IndexMap<String, String>, ExportError> {
    let mut names = ExportNames::default();
    for namespace in namespaces.values() {
        names.extend(namespace);
    }
    namespaces
        .iter()
        .map(|(key, namespace)| {
            render_module(namespace, &names, BaseSource::Import(base_module))
                .map(|source| (key.clone(), source))
        })
        .collect()
}
