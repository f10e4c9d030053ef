use std::collections::BTreeSet;

use modelbridge_core::{ColumnType, TypeArg, TypeCtor, TypeModule};

const PYTHON_KEYWORDS: [&str; 35] = [
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

pub(crate) fn is_keyword(name: &str) -> bool {
    PYTHON_KEYWORDS.contains(&name)
}

pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

/// Python name a type module is imported under.
pub(crate) fn module_prefix(module: TypeModule) -> &'static str {
    match module {
        TypeModule::Types => "types",
        TypeModule::Postgresql => "postgresql",
        TypeModule::Mysql => "mysql",
        TypeModule::Oracle => "oracle",
        TypeModule::Sqlite => "sqlite",
        TypeModule::Mssql => "mssql",
        TypeModule::Firebird => "firebird",
        TypeModule::Custom => "custom",
        TypeModule::Geo => "geo",
    }
}

/// Type modules referenced by the rendered columns.
#[derive(Default)]
pub(crate) struct UsedModules {
    modules: BTreeSet<&'static str>,
}

impl UsedModules {
    pub(crate) fn add_type(&mut self, ty: &ColumnType) {
        self.add_ctor(&ty.ctor);
        for arg in ty.args.values() {
            if let TypeArg::Type(ctor) = arg {
                self.add_ctor(ctor);
            }
        }
    }

    fn add_ctor(&mut self, ctor: &TypeCtor) {
        self.modules.insert(module_prefix(ctor.module));
    }

    pub(crate) fn uses_generic_types(&self) -> bool {
        self.modules.contains("types")
    }

    /// `from ... import ...` lines for everything but the generic types,
    /// which join the main `sqlalchemy` import.
    pub(crate) fn import_lines(&self) -> Vec<String> {
        let dialects: Vec<&str> = self
            .modules
            .iter()
            .copied()
            .filter(|m| {
                matches!(
                    *m,
                    "postgresql" | "mysql" | "oracle" | "sqlite" | "mssql" | "firebird"
                )
            })
            .collect();

        let mut lines = Vec::new();
        if !dialects.is_empty() {
            lines.push(format!("from sqlalchemy.dialects import {}", dialects.join(", ")));
        }
        if self.modules.contains("geo") {
            lines.push("from geoalchemy2 import types as geo".into());
        }
        if self.modules.contains("custom") {
            lines.push("from modelbridge import types as custom".into());
        }
        lines
    }
}

fn render_ctor(ctor: &TypeCtor) -> String {
    format!("{}.{}", module_prefix(ctor.module), ctor.name)
}

pub(crate) fn render_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn render_arg(arg: &TypeArg) -> String {
    match arg {
        TypeArg::Bool(true) => "True".into(),
        TypeArg::Bool(false) => "False".into(),
        TypeArg::Int(value) => value.to_string(),
        TypeArg::Str(value) => render_string(value),
        TypeArg::Type(ctor) => render_ctor(ctor),
    }
}

/// Instantiate a column type, e.g. `mysql.VARCHAR(length=255)`.
pub fn render_type(ty: &ColumnType) -> String {
    let args = ty
        .args
        .iter()
        .map(|(key, value)| format!("{}={}", key, render_arg(value)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({})", render_ctor(&ty.ctor), args)
}
