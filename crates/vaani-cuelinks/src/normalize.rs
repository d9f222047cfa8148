//! Normalization of raw product-feed responses.
//!
//! ## Observed shape
//!
//! The feed has shipped its product list under `products` in some responses
//! and under `items` in others. Neither key is guaranteed, and an absent list
//! means "nothing matched". [`extract_products`] looks at `products` first,
//! then `items`, and treats a missing or `null` value as an empty list.

use serde_json::Value;
use vaani_core::Product;

use crate::error::CuelinksError;

const COLLECTION_FIELDS: [&str; 2] = ["products", "items"];

/// Extracts the product list from a feed response body.
///
/// # Errors
///
/// - [`CuelinksError::UnexpectedShape`] if the chosen collection is not an array.
/// - [`CuelinksError::Deserialize`] if an element cannot be read as a [`Product`].
pub fn extract_products(body: Value) -> Result<Vec<Product>, CuelinksError> {
    let Value::Object(mut fields) = body else {
        return Ok(Vec::new());
    };

    let Some((field, collection)) = COLLECTION_FIELDS.iter().find_map(|field| {
        fields
            .remove(*field)
            .filter(|v| !v.is_null())
            .map(|v| (*field, v))
    }) else {
        return Ok(Vec::new());
    };

    let Value::Array(entries) = collection else {
        return Err(CuelinksError::UnexpectedShape {
            field,
            found: json_kind(&collection).to_string(),
        });
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| {
            serde_json::from_value::<Product>(entry).map_err(|e| CuelinksError::Deserialize {
                context: format!("{field}[{idx}]"),
                source: e,
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
