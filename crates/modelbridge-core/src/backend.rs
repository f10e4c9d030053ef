use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Database backends a column type can be registered for.
///
/// `Default` is the backend-agnostic arm used when no backend-specific type
/// exists for the active backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Postgresql,
    Mysql,
    Oracle,
    Sqlite3,
    Firebird,
    Mssql,
    Default,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown database backend: {0}")]
pub struct UnknownBackend(pub String);

impl Backend {
    pub const ALL: [Backend; 7] = [
        Backend::Postgresql,
        Backend::Mysql,
        Backend::Oracle,
        Backend::Sqlite3,
        Backend::Firebird,
        Backend::Mssql,
        Backend::Default,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Postgresql => "postgresql",
            Backend::Mysql => "mysql",
            Backend::Oracle => "oracle",
            Backend::Sqlite3 => "sqlite3",
            Backend::Firebird => "firebird",
            Backend::Mssql => "mssql",
            Backend::Default => "default",
        }
    }

    /// Detect the backend from a database engine path such as
    /// `django.db.backends.postgresql` or `django.contrib.gis.db.backends.postgis`.
    ///
    /// Only the last dotted segment is inspected; engines that are not
    /// recognised resolve to [`Backend::Default`].
    pub fn from_engine(engine: &str) -> Backend {
        let segment = engine.rsplit('.').next().unwrap_or(engine).to_lowercase();
        match segment.as_str() {
            s if s.starts_with("postgresql") || s == "postgis" => Backend::Postgresql,
            "mysql" => Backend::Mysql,
            "sqlite3" | "spatialite" => Backend::Sqlite3,
            "oracle" => Backend::Oracle,
            "mssql" | "sql_server" => Backend::Mssql,
            "firebird" => Backend::Firebird,
            _ => Backend::Default,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Backend::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| UnknownBackend(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("django.db.backends.postgresql", Backend::Postgresql)]
    #[case("django.db.backends.postgresql_psycopg2", Backend::Postgresql)]
    #[case("django.contrib.gis.db.backends.postgis", Backend::Postgresql)]
    #[case("django.db.backends.mysql", Backend::Mysql)]
    #[case("django.db.backends.sqlite3", Backend::Sqlite3)]
    #[case("django.contrib.gis.db.backends.spatialite", Backend::Sqlite3)]
    #[case("django.db.backends.oracle", Backend::Oracle)]
    #[case("mssql", Backend::Mssql)]
    #[case("sql_server.pyodbc.sql_server", Backend::Mssql)]
    #[case("some.vendor.engine", Backend::Default)]
    #[case("", Backend::Default)]
    fn test_from_engine(#[case] engine: &str, #[case] expected: Backend) {
        assert_eq!(Backend::from_engine(engine), expected);
    }

    #[test]
    fn test_from_str_round_trips_every_tag() {
        for backend in Backend::ALL {
            assert_eq!(backend.as_str().parse::<Backend>(), Ok(backend));
        }
    }

    #[test]
    fn test_from_str_unknown() {
        assert_eq!(
            "db2".parse::<Backend>(),
            Err(UnknownBackend("db2".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_lowercase_tags() {
        let json = serde_json::to_string(&Backend::Sqlite3).unwrap();
        assert_eq!(json, "\"sqlite3\"");
        let parsed: Backend = serde_json::from_str("\"mssql\"").unwrap();
        assert_eq!(parsed, Backend::Mssql);
    }
}
