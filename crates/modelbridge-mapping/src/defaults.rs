//! Built-in field class table.

use modelbridge_core::{TypeCtor, TypeModule};

use crate::hooks::Hook;
use crate::registry::{Fragment, Registry};

use modelbridge_core::Backend::{Default as Any, Mysql, Oracle, Postgresql};

mod types {
    use super::*;

    pub const INTEGER: TypeCtor = TypeCtor::new(TypeModule::Types, "INTEGER");
    pub const SMALLINT: TypeCtor = TypeCtor::new(TypeModule::Types, "SMALLINT");
    pub const BIGINT: TypeCtor = TypeCtor::new(TypeModule::Types, "BIGINT");
    pub const BOOLEAN: TypeCtor = TypeCtor::new(TypeModule::Types, "BOOLEAN");
    pub const VARCHAR: TypeCtor = TypeCtor::new(TypeModule::Types, "VARCHAR");
    pub const CHAR: TypeCtor = TypeCtor::new(TypeModule::Types, "CHAR");
    pub const TEXT: TypeCtor = TypeCtor::new(TypeModule::Types, "TEXT");
    pub const DATE: TypeCtor = TypeCtor::new(TypeModule::Types, "DATE");
    pub const DATETIME: TypeCtor = TypeCtor::new(TypeModule::Types, "DATETIME");
    pub const TIME: TypeCtor = TypeCtor::new(TypeModule::Types, "TIME");
    pub const NUMERIC: TypeCtor = TypeCtor::new(TypeModule::Types, "NUMERIC");
    pub const FLOAT: TypeCtor = TypeCtor::new(TypeModule::Types, "FLOAT");
    pub const BINARY: TypeCtor = TypeCtor::new(TypeModule::Types, "LargeBinary");
    pub const JSON: TypeCtor = TypeCtor::new(TypeModule::Types, "JSON");
}

mod pg {
    use super::*;

    pub const INTEGER: TypeCtor = TypeCtor::new(TypeModule::Postgresql, "INTEGER");
    pub const SMALLINT: TypeCtor = TypeCtor::new(TypeModule::Postgresql, "SMALLINT");
    pub const BIGINT: TypeCtor = TypeCtor::new(TypeModule::Postgresql, "BIGINT");
    pub const BOOLEAN: TypeCtor = TypeCtor::new(TypeModule::Postgresql, "BOOLEAN");
    pub const VARCHAR: TypeCtor = TypeCtor::new(TypeModule::Postgresql, "VARCHAR");
    pub const TEXT: TypeCtor = TypeCtor::new(TypeModule::Postgresql, "TEXT");
    pub const DATE: TypeCtor = TypeCtor::new(TypeModule::Postgresql, "DATE");
    pub const TIMESTAMP: TypeCtor = TypeCtor::new(TypeModule::Postgresql, "TIMESTAMP");
    pub const TIME: TypeCtor = TypeCtor::new(TypeModule::Postgresql, "TIME");
    pub const INTERVAL: TypeCtor = TypeCtor::new(TypeModule::Postgresql, "INTERVAL");
    pub const NUMERIC: TypeCtor = TypeCtor::new(TypeModule::Postgresql, "NUMERIC");
    pub const DOUBLE_PRECISION: TypeCtor =
        TypeCtor::new(TypeModule::Postgresql, "DOUBLE_PRECISION");
    pub const BYTEA: TypeCtor = TypeCtor::new(TypeModule::Postgresql, "BYTEA");
    pub const UUID: TypeCtor = TypeCtor::new(TypeModule::Postgresql, "UUID");
    pub const INET: TypeCtor = TypeCtor::new(TypeModule::Postgresql, "INET");
    pub const JSONB: TypeCtor = TypeCtor::new(TypeModule::Postgresql, "JSONB");
    pub const HSTORE: TypeCtor = TypeCtor::new(TypeModule::Postgresql, "HSTORE");
    pub const ARRAY: TypeCtor = TypeCtor::new(TypeModule::Postgresql, "ARRAY");
}

mod mysql {
    use super::*;

    pub const INTEGER: TypeCtor = TypeCtor::new(TypeModule::Mysql, "INTEGER");
    pub const SMALLINT: TypeCtor = TypeCtor::new(TypeModule::Mysql, "SMALLINT");
    pub const BIGINT: TypeCtor = TypeCtor::new(TypeModule::Mysql, "BIGINT");
    pub const BOOLEAN: TypeCtor = TypeCtor::new(TypeModule::Mysql, "BOOLEAN");
    pub const VARCHAR: TypeCtor = TypeCtor::new(TypeModule::Mysql, "VARCHAR");
    pub const CHAR: TypeCtor = TypeCtor::new(TypeModule::Mysql, "CHAR");
    pub const LONGTEXT: TypeCtor = TypeCtor::new(TypeModule::Mysql, "LONGTEXT");
    pub const DATE: TypeCtor = TypeCtor::new(TypeModule::Mysql, "DATE");
    pub const DATETIME: TypeCtor = TypeCtor::new(TypeModule::Mysql, "DATETIME");
    pub const TIME: TypeCtor = TypeCtor::new(TypeModule::Mysql, "TIME");
    pub const DECIMAL: TypeCtor = TypeCtor::new(TypeModule::Mysql, "DECIMAL");
    pub const DOUBLE: TypeCtor = TypeCtor::new(TypeModule::Mysql, "DOUBLE");
    pub const LONGBLOB: TypeCtor = TypeCtor::new(TypeModule::Mysql, "LONGBLOB");
    pub const JSON: TypeCtor = TypeCtor::new(TypeModule::Mysql, "JSON");
}

mod oracle {
    use super::*;

    pub const VARCHAR2: TypeCtor = TypeCtor::new(TypeModule::Oracle, "VARCHAR2");
    pub const CLOB: TypeCtor = TypeCtor::new(TypeModule::Oracle, "CLOB");
    pub const BLOB: TypeCtor = TypeCtor::new(TypeModule::Oracle, "BLOB");
    pub const TIMESTAMP: TypeCtor = TypeCtor::new(TypeModule::Oracle, "TIMESTAMP");
    pub const INTERVAL: TypeCtor = TypeCtor::new(TypeModule::Oracle, "INTERVAL");
}

const CITEXT: TypeCtor = TypeCtor::new(TypeModule::Custom, "CIText");
const GEOMETRY: TypeCtor = TypeCtor::new(TypeModule::Geo, "Geometry");

const GEOMETRY_FIELDS: [(&str, &str); 8] = [
    ("GeometryField", "GEOMETRY"),
    ("PointField", "POINT"),
    ("LineStringField", "LINESTRING"),
    ("PolygonField", "POLYGON"),
    ("MultiPointField", "MULTIPOINT"),
    ("MultiLineStringField", "MULTILINESTRING"),
    ("MultiPolygonField", "MULTIPOLYGON"),
    ("GeometryCollectionField", "GEOMETRYCOLLECTION"),
];

fn integer() -> Fragment {
    Fragment::typed(&[
        (Postgresql, pg::INTEGER),
        (Mysql, mysql::INTEGER),
        (Any, types::INTEGER),
    ])
}

fn small_integer() -> Fragment {
    Fragment::typed(&[
        (Postgresql, pg::SMALLINT),
        (Mysql, mysql::SMALLINT),
        (Any, types::SMALLINT),
    ])
}

fn big_integer() -> Fragment {
    Fragment::typed(&[
        (Postgresql, pg::BIGINT),
        (Mysql, mysql::BIGINT),
        (Any, types::BIGINT),
    ])
}

fn varchar() -> Fragment {
    Fragment::typed(&[
        (Postgresql, pg::VARCHAR),
        (Mysql, mysql::VARCHAR),
        (Oracle, oracle::VARCHAR2),
        (Any, types::VARCHAR),
    ])
    .with_hook(Hook::MaxLength)
}

fn fixed_char(length: u32) -> Fragment {
    Fragment::typed(&[(Mysql, mysql::CHAR), (Any, types::CHAR)])
        .with_type_option(Mysql, "length", length)
        .with_type_option(Any, "length", length)
}

/// Register the built-in field classes.
pub fn install(registry: &mut Registry) {
    registry.register("AutoField", integer().with_autoincrement(true));
    registry.register("SmallAutoField", small_integer().with_autoincrement(true));
    registry.register("BigAutoField", big_integer().with_autoincrement(true));

    for class in ["IntegerField", "PositiveIntegerField"] {
        registry.register(class, integer());
    }
    for class in ["SmallIntegerField", "PositiveSmallIntegerField"] {
        registry.register(class, small_integer());
    }
    for class in ["BigIntegerField", "PositiveBigIntegerField"] {
        registry.register(class, big_integer());
    }

    for class in ["BooleanField", "NullBooleanField"] {
        registry.register(
            class,
            Fragment::typed(&[
                (Postgresql, pg::BOOLEAN),
                (Mysql, mysql::BOOLEAN),
                (Any, types::BOOLEAN),
            ]),
        );
    }

    for class in [
        "CharField",
        "SlugField",
        "EmailField",
        "URLField",
        "FileField",
        "ImageField",
        "FilePathField",
    ] {
        registry.register(class, varchar());
    }
    registry.register(
        "TextField",
        Fragment::typed(&[
            (Postgresql, pg::TEXT),
            (Mysql, mysql::LONGTEXT),
            (Oracle, oracle::CLOB),
            (Any, types::TEXT),
        ]),
    );

    for class in ["CICharField", "CIEmailField"] {
        registry.register(class, varchar().with_type(Postgresql, CITEXT));
    }
    registry.register(
        "CITextField",
        Fragment::typed(&[(Postgresql, CITEXT), (Mysql, mysql::LONGTEXT), (Any, types::TEXT)]),
    );

    registry.register(
        "DateField",
        Fragment::typed(&[(Postgresql, pg::DATE), (Mysql, mysql::DATE), (Any, types::DATE)]),
    );
    registry.register(
        "DateTimeField",
        Fragment::typed(&[
            (Postgresql, pg::TIMESTAMP),
            (Mysql, mysql::DATETIME),
            (Oracle, oracle::TIMESTAMP),
            (Any, types::DATETIME),
        ]),
    );
    registry.register(
        "TimeField",
        Fragment::typed(&[(Postgresql, pg::TIME), (Mysql, mysql::TIME), (Any, types::TIME)]),
    );
    registry.register(
        "DurationField",
        Fragment::typed(&[
            (Postgresql, pg::INTERVAL),
            (Oracle, oracle::INTERVAL),
            (Mysql, mysql::BIGINT),
            (Any, types::BIGINT),
        ]),
    );

    registry.register(
        "DecimalField",
        Fragment::typed(&[
            (Postgresql, pg::NUMERIC),
            (Mysql, mysql::DECIMAL),
            (Any, types::NUMERIC),
        ])
        .with_hook(Hook::Decimal),
    );
    registry.register(
        "FloatField",
        Fragment::typed(&[
            (Postgresql, pg::DOUBLE_PRECISION),
            (Mysql, mysql::DOUBLE),
            (Any, types::FLOAT),
        ]),
    );

    registry.register(
        "BinaryField",
        Fragment::typed(&[
            (Postgresql, pg::BYTEA),
            (Mysql, mysql::LONGBLOB),
            (Oracle, oracle::BLOB),
            (Any, types::BINARY),
        ]),
    );
    registry.register("UUIDField", fixed_char(32).with_type(Postgresql, pg::UUID));
    registry.register(
        "GenericIPAddressField",
        fixed_char(39).with_type(Postgresql, pg::INET),
    );
    registry.register("IPAddressField", fixed_char(15).with_type(Postgresql, pg::INET));
    registry.register(
        "JSONField",
        Fragment::typed(&[(Postgresql, pg::JSONB), (Mysql, mysql::JSON), (Any, types::JSON)]),
    );
    registry.register("HStoreField", Fragment::typed(&[(Postgresql, pg::HSTORE)]));
    registry.register(
        "ArrayField",
        Fragment::typed(&[(Postgresql, pg::ARRAY)]).with_hook(Hook::Array),
    );

    for (class, kind) in GEOMETRY_FIELDS {
        registry.register(
            class,
            Fragment::typed(&[(Any, GEOMETRY)]).with_hook(Hook::Geometry(kind)),
        );
    }

    registry.register("ForeignKey", Fragment::new().with_hook(Hook::ForeignKey));
    registry.register("OneToOneField", Fragment::new().with_hook(Hook::ForeignKey));
    registry.register("ManyToManyField", Fragment::new().with_hook(Hook::ManyToMany));
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelbridge_core::{Backend, TypeArg};
    use rstest::rstest;

    #[rstest]
    #[case("TextField", Backend::Mysql, "LONGTEXT")]
    #[case("TextField", Backend::Sqlite3, "TEXT")]
    #[case("DateTimeField", Backend::Postgresql, "TIMESTAMP")]
    #[case("DateTimeField", Backend::Mysql, "DATETIME")]
    #[case("DurationField", Backend::Postgresql, "INTERVAL")]
    #[case("DurationField", Backend::Mysql, "BIGINT")]
    #[case("FloatField", Backend::Postgresql, "DOUBLE_PRECISION")]
    #[case("BinaryField", Backend::Postgresql, "BYTEA")]
    #[case("JSONField", Backend::Postgresql, "JSONB")]
    #[case("CITextField", Backend::Postgresql, "CIText")]
    #[case("BooleanField", Backend::Firebird, "BOOLEAN")]
    fn test_builtin_arms(#[case] class: &str, #[case] backend: Backend, #[case] expected: &str) {
        let registry = Registry::with_defaults();
        let entry = registry.lookup(class).unwrap();
        let ctor = entry
            .types
            .get(&backend)
            .or_else(|| entry.types.get(&Backend::Default))
            .unwrap();
        assert_eq!(ctor.name, expected);
    }

    #[test]
    fn test_uuid_falls_back_to_fixed_char() {
        let registry = Registry::with_defaults();
        let entry = registry.lookup("UUIDField").unwrap();
        assert_eq!(entry.types[&Backend::Postgresql], pg::UUID);
        assert_eq!(entry.types[&Backend::Default], types::CHAR);
        assert_eq!(entry.type_options[&Backend::Default]["length"], TypeArg::Int(32));
        assert!(!entry.type_options.contains_key(&Backend::Postgresql));
    }

    #[test]
    fn test_ci_char_field_keeps_length_off_citext() {
        use crate::field::FieldParser;
        use modelbridge_core::{SourceField, SourceModel, SourceModule};

        let registry = Registry::with_defaults();
        let module = SourceModule::new("accounts.models");
        let parser = FieldParser::new(&registry, &module);
        let model = SourceModel::new("accounts", "User", "accounts.models")
            .with_field(SourceField::new("email", "CIEmailField").with_max_length(254));
        let email = parser.parse_field(&model, &model.fields[0]).unwrap();

        let pg = email.column_type(Backend::Postgresql).unwrap();
        assert_eq!(pg.name(), "CIText");
        assert!(pg.args.is_empty());
        let mysql = email.column_type(Backend::Mysql).unwrap();
        assert_eq!(mysql.args["length"], TypeArg::Int(254));
    }

    #[test]
    fn test_postgres_only_classes() {
        let registry = Registry::with_defaults();
        for class in ["HStoreField", "ArrayField"] {
            let entry = registry.lookup(class).unwrap();
            assert_eq!(entry.types.keys().collect::<Vec<_>>(), vec![&Backend::Postgresql]);
        }
    }

    #[test]
    fn test_relation_classes_are_hook_only() {
        let registry = Registry::with_defaults();
        for class in ["ForeignKey", "OneToOneField", "ManyToManyField"] {
            let entry = registry.lookup(class).unwrap();
            assert!(entry.types.is_empty());
            assert!(entry.hook.is_some());
        }
    }
}
