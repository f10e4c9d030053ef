//! Naming conventions and helpers for modelbridge.
//!
//! This crate provides the name derivations the source framework applies
//! implicitly (default table names, foreign-key attribute names, reverse
//! relation names) and the case conversions used when publishing target
//! classes. It has no dependencies and can be used by any other modelbridge
//! crate.

// ============================================================================
// Source Framework Defaults
// ============================================================================

/// Default database table for a model that does not set one explicitly.
///
/// # Examples
/// ```
/// use modelbridge_naming::default_table_name;
///
/// assert_eq!(default_table_name("auth", "User"), "auth_user");
/// assert_eq!(default_table_name("books", "BookCategory"), "books_bookcategory");
/// ```
pub fn default_table_name(app_label: &str, object_name: &str) -> String {
    format!("{}_{}", app_label, object_name.to_lowercase())
}

/// Attribute (and column) name of a foreign-key field.
///
/// # Examples
/// ```
/// use modelbridge_naming::relation_attname;
///
/// assert_eq!(relation_attname("author"), "author_id");
/// ```
pub fn relation_attname(field_name: &str) -> String {
    format!("{}_id", field_name)
}

/// Reverse relation name used when a relation does not name one itself.
///
/// The source framework derives it from the declaring model's name, lowercased.
pub fn default_related_name(object_name: &str) -> String {
    object_name.to_lowercase()
}

/// Splits a trailing `+` off a related name.
///
/// Returns the bare name and whether the marker was present.
///
/// # Examples
/// ```
/// use modelbridge_naming::split_related_name;
///
/// assert_eq!(split_related_name("books"), ("books", false));
/// assert_eq!(split_related_name("books+"), ("books", true));
/// assert_eq!(split_related_name("+"), ("", true));
/// ```
pub fn split_related_name(name: &str) -> (&str, bool) {
    let trimmed = name.trim_end_matches('+');
    (trimmed, trimmed.len() != name.len())
}

// ============================================================================
// Case Conversion
// ============================================================================

/// Convert snake_case to PascalCase. Already capitalized words are kept as-is,
/// so model names like `BookCategory` come back unchanged.
///
/// # Examples
/// ```
/// use modelbridge_naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
/// assert_eq!(to_pascal_case("book_category"), "BookCategory");
/// assert_eq!(to_pascal_case("BookCategory"), "BookCategory");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize = true;
    for c in s.chars() {
        let is_separator = c == '_' || c == '-';
        if is_separator {
            capitalize = true;
            continue;
        }
        let ch = if capitalize {
            c.to_ascii_uppercase()
        } else {
            c
        };
        capitalize = false;
        result.push(ch);
    }
    result
}

/// Convert to camelCase (PascalCase with a lowercase first letter).
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Convert PascalCase or camelCase to snake_case.
///
/// Runs of capitals are kept together (`HTTPLog` becomes `http_log`).
///
/// # Examples
/// ```
/// use modelbridge_naming::to_snake_case;
///
/// assert_eq!(to_snake_case("BookCategory"), "book_category");
/// assert_eq!(to_snake_case("author"), "author");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '-' {
            result.push('_');
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev != '_' && prev != '-' && (prev.is_lowercase() || prev.is_ascii_digit() || next_is_lower) {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }
    result
}
