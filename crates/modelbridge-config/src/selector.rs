use std::fmt;

use serde::{Deserialize, Serialize};

use modelbridge_core::{Backend, UnknownBackend};

/// Selects which backend arm of each column type is materialized.
///
/// Serialized as a backend tag, or `"auto"` to detect the backend from the
/// configured database engine at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BackendSelector {
    Fixed(Backend),
    #[default]
    AutoDetect,
}

const AUTO: &str = "auto";

impl BackendSelector {
    pub fn resolve(self, engine: Option<&str>) -> Backend {
        match self {
            BackendSelector::Fixed(backend) => backend,
            BackendSelector::AutoDetect => engine.map_or(Backend::Default, Backend::from_engine),
        }
    }
}

impl From<Backend> for BackendSelector {
    fn from(value: Backend) -> Self {
        BackendSelector::Fixed(value)
    }
}

impl TryFrom<String> for BackendSelector {
    type Error = UnknownBackend;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == AUTO {
            Ok(BackendSelector::AutoDetect)
        } else {
            value.parse().map(BackendSelector::Fixed)
        }
    }
}

impl From<BackendSelector> for String {
    fn from(value: BackendSelector) -> Self {
        value.to_string()
    }
}

impl fmt::Display for BackendSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendSelector::Fixed(backend) => f.write_str(backend.as_str()),
            BackendSelector::AutoDetect => f.write_str(AUTO),
        }
    }
}

#[cfg(feature = "schema")]
impl schemars::JsonSchema for BackendSelector {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "BackendSelector".into()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        let mut tags: Vec<&str> = Backend::ALL.iter().map(|b| b.as_str()).collect();
        tags.push(AUTO);
        schemars::json_schema!({
            "type": "string",
            "enum": tags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(BackendSelector::Fixed(Backend::Oracle), None, Backend::Oracle)]
    #[case(BackendSelector::Fixed(Backend::Oracle), Some("django.db.backends.mysql"), Backend::Oracle)]
    #[case(BackendSelector::AutoDetect, Some("django.db.backends.postgresql"), Backend::Postgresql)]
    #[case(BackendSelector::AutoDetect, None, Backend::Default)]
    fn test_resolve(
        #[case] selector: BackendSelector,
        #[case] engine: Option<&str>,
        #[case] expected: Backend,
    ) {
        assert_eq!(selector.resolve(engine), expected);
    }

    #[test]
    fn test_serde() {
        let parsed: BackendSelector = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(parsed, BackendSelector::AutoDetect);
        let parsed: BackendSelector = serde_json::from_str("\"sqlite3\"").unwrap();
        assert_eq!(parsed, BackendSelector::Fixed(Backend::Sqlite3));
        assert_eq!(
            serde_json::to_string(&BackendSelector::Fixed(Backend::Mysql)).unwrap(),
            "\"mysql\""
        );
        assert!(serde_json::from_str::<BackendSelector>("\"db2\"").is_err());
    }
}
