use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Module of the target toolkit a type constructor lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum TypeModule {
    /// Backend-agnostic generic types.
    Types,
    Postgresql,
    Mysql,
    Oracle,
    Sqlite,
    Mssql,
    Firebird,
    /// Types shipped with modelbridge itself (case-insensitive text, ...).
    Custom,
    /// Spatial types.
    Geo,
}

/// A target column type constructor, e.g. `postgresql.VARCHAR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct TypeCtor {
    pub module: TypeModule,
    pub name: Cow<'static, str>,
}

impl TypeCtor {
    pub const fn new(module: TypeModule, name: &'static str) -> Self {
        Self {
            module,
            name: Cow::Borrowed(name),
        }
    }

    /// Instantiate with no constructor arguments.
    pub fn call(&self) -> ColumnType {
        ColumnType::new(self.clone())
    }
}

/// A keyword argument passed to a type constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(untagged)]
pub enum TypeArg {
    Bool(bool),
    Int(i64),
    Str(String),
    Type(TypeCtor),
}

impl From<bool> for TypeArg {
    fn from(value: bool) -> Self {
        TypeArg::Bool(value)
    }
}

impl From<i64> for TypeArg {
    fn from(value: i64) -> Self {
        TypeArg::Int(value)
    }
}

impl From<u32> for TypeArg {
    fn from(value: u32) -> Self {
        TypeArg::Int(i64::from(value))
    }
}

impl From<&str> for TypeArg {
    fn from(value: &str) -> Self {
        TypeArg::Str(value.to_string())
    }
}

impl From<TypeCtor> for TypeArg {
    fn from(value: TypeCtor) -> Self {
        TypeArg::Type(value)
    }
}

/// An instantiated column type: constructor plus keyword arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ColumnType {
    pub ctor: TypeCtor,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub args: IndexMap<String, TypeArg>,
}

impl ColumnType {
    pub fn new(ctor: TypeCtor) -> Self {
        Self {
            ctor,
            args: IndexMap::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<TypeArg>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.ctor.name
    }
}
