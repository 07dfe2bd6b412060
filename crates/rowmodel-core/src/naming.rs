//! Naming helpers: case translation, persistability filters, and the
//! composite primary-key clause builder.
//!
//! Everything here is pure and stateless. Entities use camelCase field
//! names in memory and snake_case column names at the storage boundary;
//! these helpers own the translation in both directions.

use crate::error::{Error, Result};
use crate::value::Value;

/// Convert a camelCase/PascalCase identifier into snake_case.
///
/// Word boundaries fall before an uppercase letter that follows a lowercase
/// letter or digit, and before the last uppercase of an uppercase run that
/// is followed by a lowercase tail. A trailing acronym stays one word:
///
/// ```
/// use rowmodel_core::naming::to_storage_case;
///
/// assert_eq!(to_storage_case("tenantId"), "tenant_id");
/// assert_eq!(to_storage_case("parseXMLDocument"), "parse_xml_document");
/// assert_eq!(to_storage_case("responseHTTP"), "response_http");
/// ```
#[must_use]
pub fn to_storage_case(identifier: &str) -> String {
    let chars: Vec<char> = identifier.chars().collect();
    let mut out = String::with_capacity(identifier.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = if i > 0 { Some(chars[i - 1]) } else { None };
            let next = chars.get(i + 1);
            let after_word = prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit());
            let acronym_end =
                prev.is_some_and(char::is_uppercase) && next.is_some_and(|n| n.is_lowercase());
            if !out.is_empty() && (after_word || acronym_end) {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// Convert a snake_case column name into a lower-camelCase field name.
///
/// This is the inverse derivation used for setter lookup during assembly.
/// For identifiers built from alphabetic word segments (no digits at word
/// boundaries), it round-trips with [`to_storage_case`].
#[must_use]
pub fn to_field_case(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    let mut upper_next = false;

    for c in identifier.chars() {
        if c == '_' {
            upper_next = true;
            continue;
        }
        if upper_next && !out.is_empty() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        upper_next = false;
    }

    out
}

/// Null filter: true iff the value is non-null.
#[must_use]
pub const fn is_not_null(value: &Value) -> bool {
    !value.is_null()
}

/// Persistable-value filter: true iff the value is a number, a boolean, or
/// text. Only flat scalars are valid column values; everything else is
/// stripped out of insert/update payloads.
#[must_use]
pub const fn is_persistable(value: &Value) -> bool {
    matches!(
        value,
        Value::Bool(_) | Value::Int(_) | Value::Double(_) | Value::Text(_)
    )
}

/// Build a composite primary-key WHERE clause and split the payload.
///
/// `primary_key` carries `(field name, storage column)` pairs in declaration
/// order. Each key must be present in the storage-case `payload`; otherwise
/// this fails with [`Error::MissingKey`] naming the field and the target.
/// Consumed keys are removed from `payload`, so what remains afterwards is
/// exactly the non-key columns to write.
///
/// Returns the clause (`col = ?` fragments joined by ` AND `) and the bound
/// values in key order.
pub fn primary_key_clause(
    primary_key: &[(&str, &str)],
    target: &str,
    payload: &mut Vec<(String, Value)>,
) -> Result<(String, Vec<Value>)> {
    let mut fragments = Vec::with_capacity(primary_key.len());
    let mut bound = Vec::with_capacity(primary_key.len());

    for &(field, storage) in primary_key {
        let Some(pos) = payload.iter().position(|(column, _)| column == storage) else {
            return Err(Error::MissingKey {
                field: field.to_string(),
                target: target.to_string(),
            });
        };
        let (_, value) = payload.remove(pos);
        fragments.push(format!("{storage} = ?"));
        bound.push(value);
    }

    Ok((fragments.join(" AND "), bound))
}
