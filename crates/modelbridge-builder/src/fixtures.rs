//! Source models shared by the builder tests.

use modelbridge_core::{
    ModelRef, OnDelete, SourceApps, SourceField, SourceModel, SourceModule, SourceRelation,
};

pub fn author() -> ModelRef {
    ModelRef::new("books", "Author")
}

pub fn book() -> ModelRef {
    ModelRef::new("books", "Book")
}

pub fn category() -> ModelRef {
    ModelRef::new("books", "Category")
}

fn pk() -> SourceField {
    SourceField::new("id", "AutoField")
        .with_primary_key(true)
        .with_unique(true)
        .with_null(false)
}

fn fk(name: &str, to: ModelRef) -> SourceField {
    SourceField::new(name, "ForeignKey")
        .with_null(false)
        .with_relation(SourceRelation::foreign_key(to, OnDelete::Cascade))
}

/// `books.models`: authors, books with categories, and a self-referential
/// category tree.
pub fn books_module() -> SourceModule {
    SourceModule::new("books.models")
        .with_model(
            SourceModel::new("books", "Author", "books.models")
                .with_db_table("author")
                .with_field(pk())
                .with_field(
                    SourceField::new("name", "CharField")
                        .with_max_length(255)
                        .with_null(false),
                )
                .with_field(SourceField::new("age", "PositiveSmallIntegerField").with_null(false)),
        )
        .with_model(
            SourceModel::new("books", "Category", "books.models")
                .with_field(pk())
                .with_field(
                    SourceField::new("name", "CharField")
                        .with_max_length(100)
                        .with_null(false),
                )
                .with_field(SourceField::new("related", "ManyToManyField").with_relation(
                    SourceRelation::many_to_many(
                        category(),
                        ModelRef::new("books", "CategoryRelation"),
                    )
                    .with_related_name("children"),
                )),
        )
        .with_model(
            SourceModel::new("books", "CategoryRelation", "books.models")
                .with_field(pk())
                .with_field(SourceField::new("from_category", "ForeignKey").with_relation(
                    SourceRelation::foreign_key(category(), OnDelete::Cascade)
                        .with_related_name("+"),
                ))
                .with_field(SourceField::new("to_category", "ForeignKey").with_relation(
                    SourceRelation::foreign_key(category(), OnDelete::Cascade)
                        .with_related_name("+"),
                )),
        )
        .with_model(
            SourceModel::new("books", "Book", "books.models")
                .with_field(pk())
                .with_field(
                    SourceField::new("title", "CharField")
                        .with_max_length(200)
                        .with_null(false),
                )
                .with_field(
                    SourceField::new("author", "ForeignKey")
                        .with_null(true)
                        .with_relation(
                            SourceRelation::foreign_key(author(), OnDelete::SetNull)
                                .with_related_name("books"),
                        ),
                )
                .with_field(SourceField::new("attributes", "HStoreField").with_null(true))
                .with_field(SourceField::new("published", "DateTimeField").with_null(true))
                .with_field(SourceField::new("category", "ManyToManyField").with_relation(
                    SourceRelation::many_to_many(category(), ModelRef::new("books", "BookCategory")),
                )),
        )
        .with_model(
            SourceModel::new("books", "BookCategory", "books.models")
                .with_field(pk())
                .with_field(fk("book", book()))
                .with_field(fk("category", category())),
        )
}

/// `sales.models`: declares `Sale` and imports `Book` from `books.models`.
pub fn sales_module() -> SourceModule {
    let imported = books_module()
        .models
        .into_iter()
        .find(|m| m.object_name == "Book");
    let module = SourceModule::new("sales.models").with_model(
        SourceModel::new("sales", "Sale", "sales.models")
            .with_field(pk())
            .with_field(fk("book", book()))
            .with_field(SourceField::new("sold_at", "DateTimeField").with_null(false)),
    );
    match imported {
        Some(model) => module.with_model(model),
        None => module,
    }
}

pub fn apps() -> SourceApps {
    SourceApps::new()
        .with_module(books_module())
        .with_module(sales_module())
}
