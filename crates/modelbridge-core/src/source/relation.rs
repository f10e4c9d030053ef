use serde::{Deserialize, Serialize};

use crate::schema::ReferenceAction;
use crate::source::model::ModelRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    ForeignKey,
    OneToOne,
    ManyToMany,
}

impl RelationKind {
    /// Foreign keys and one-to-one relations are stored in a local column;
    /// many-to-many relations live entirely in their through model.
    pub fn has_column(self) -> bool {
        matches!(self, RelationKind::ForeignKey | RelationKind::OneToOne)
    }
}

/// Deletion behaviour declared on a source foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnDelete {
    Cascade,
    Protect,
    SetNull,
    SetDefault,
    DoNothing,
    Restrict,
}

impl OnDelete {
    /// The database-level action emitted on the target foreign key.
    ///
    /// `Protect` and `DoNothing` are enforced by the source framework itself
    /// and carry no database action.
    pub fn reference_action(self) -> Option<ReferenceAction> {
        match self {
            OnDelete::Cascade => Some(ReferenceAction::Cascade),
            OnDelete::SetNull => Some(ReferenceAction::SetNull),
            OnDelete::SetDefault => Some(ReferenceAction::SetDefault),
            OnDelete::Restrict => Some(ReferenceAction::Restrict),
            OnDelete::Protect | OnDelete::DoNothing => None,
        }
    }
}

/// Relation metadata of a relational source field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct SourceRelation {
    pub kind: RelationKind,
    pub to: ModelRef,
    /// Referenced field on `to`; the target's primary key when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<OnDelete>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub through: Option<ModelRef>,
    /// `(source_field, target_field)` names on the through model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub through_fields: Option<(String, String)>,
    /// Loading strategy forwarded to the target relationship.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lazy: Option<String>,
}

impl SourceRelation {
    fn new(kind: RelationKind, to: ModelRef) -> Self {
        Self {
            kind,
            to,
            to_field: None,
            on_delete: None,
            related_name: None,
            through: None,
            through_fields: None,
            lazy: None,
        }
    }

    pub fn foreign_key(to: ModelRef, on_delete: OnDelete) -> Self {
        Self {
            on_delete: Some(on_delete),
            ..Self::new(RelationKind::ForeignKey, to)
        }
    }

    pub fn one_to_one(to: ModelRef, on_delete: OnDelete) -> Self {
        Self {
            on_delete: Some(on_delete),
            ..Self::new(RelationKind::OneToOne, to)
        }
    }

    pub fn many_to_many(to: ModelRef, through: ModelRef) -> Self {
        Self {
            through: Some(through),
            ..Self::new(RelationKind::ManyToMany, to)
        }
    }

    pub fn with_to_field(mut self, to_field: impl Into<String>) -> Self {
        self.to_field = Some(to_field.into());
        self
    }

    pub fn with_related_name(mut self, related_name: impl Into<String>) -> Self {
        self.related_name = Some(related_name.into());
        self
    }

    pub fn with_through_fields(
        mut self,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.through_fields = Some((source.into(), target.into()));
        self
    }

    pub fn with_lazy(mut self, lazy: impl Into<String>) -> Self {
        self.lazy = Some(lazy.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(OnDelete::Cascade, Some(ReferenceAction::Cascade))]
    #[case(OnDelete::SetNull, Some(ReferenceAction::SetNull))]
    #[case(OnDelete::SetDefault, Some(ReferenceAction::SetDefault))]
    #[case(OnDelete::Restrict, Some(ReferenceAction::Restrict))]
    #[case(OnDelete::Protect, None)]
    #[case(OnDelete::DoNothing, None)]
    fn test_reference_action(#[case] on_delete: OnDelete, #[case] expected: Option<ReferenceAction>) {
        assert_eq!(on_delete.reference_action(), expected);
    }

    #[test]
    fn test_on_delete_uses_source_framework_names() {
        let parsed: OnDelete = serde_json::from_str("\"SET_NULL\"").unwrap();
        assert_eq!(parsed, OnDelete::SetNull);
        let parsed: OnDelete = serde_json::from_str("\"DO_NOTHING\"").unwrap();
        assert_eq!(parsed, OnDelete::DoNothing);
    }

    #[test]
    fn test_deserialize_many_to_many() {
        let relation: SourceRelation = serde_json::from_str(
            r#"{"kind": "many_to_many", "to": "books.Category", "through": "books.BookCategory", "related_name": "books"}"#,
        )
        .unwrap();
        assert_eq!(relation.kind, RelationKind::ManyToMany);
        assert_eq!(relation.to, ModelRef::new("books", "Category"));
        assert_eq!(relation.through, Some(ModelRef::new("books", "BookCategory")));
        assert_eq!(relation.related_name.as_deref(), Some("books"));
        assert!(!relation.kind.has_column());
    }
}
