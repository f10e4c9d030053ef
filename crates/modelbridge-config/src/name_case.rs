use serde::{Deserialize, Serialize};

use modelbridge_naming::{to_camel_case, to_pascal_case, to_snake_case};

/// Supported naming cases for exported names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum NameCase {
    Snake,
    Camel,
    /// Leaves source model names (already PascalCase) unchanged.
    #[default]
    Pascal,
}

impl NameCase {
    /// Returns true when snake case.
    pub fn is_snake(self) -> bool {
        matches!(self, NameCase::Snake)
    }

    /// Returns true when camel case.
    pub fn is_camel(self) -> bool {
        matches!(self, NameCase::Camel)
    }

    /// Returns true when pascal case.
    pub fn is_pascal(self) -> bool {
        matches!(self, NameCase::Pascal)
    }

    pub fn apply(self, name: &str) -> String {
        match self {
            NameCase::Snake => to_snake_case(name),
            NameCase::Camel => to_camel_case(name),
            NameCase::Pascal => to_pascal_case(name),
        }
    }
}
