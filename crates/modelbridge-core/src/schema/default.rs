use serde::{Deserialize, Serialize};

/// Default value of a column: a literal, or a callable the target toolkit
/// invokes on insert.
///
/// Literals serialize as plain JSON values; callables as
/// `{"callable": "uuid.uuid4"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(untagged)]
pub enum ColumnDefault {
    Bool(bool),
    Int(i64),
    Str(String),
    /// Dotted path of a callable, e.g. `uuid.uuid4`.
    Callable { callable: String },
}

impl ColumnDefault {
    pub fn callable(path: impl Into<String>) -> Self {
        ColumnDefault::Callable {
            callable: path.into(),
        }
    }

    /// Module a callable default has to be imported from, if any.
    pub fn module(&self) -> Option<&str> {
        match self {
            ColumnDefault::Callable { callable } => callable.rsplit_once('.').map(|(m, _)| m),
            _ => None,
        }
    }
}

impl From<bool> for ColumnDefault {
    fn from(value: bool) -> Self {
        ColumnDefault::Bool(value)
    }
}

impl From<i64> for ColumnDefault {
    fn from(value: i64) -> Self {
        ColumnDefault::Int(value)
    }
}

impl From<&str> for ColumnDefault {
    fn from(value: &str) -> Self {
        ColumnDefault::Str(value.to_string())
    }
}
