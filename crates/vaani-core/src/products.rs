//! Affiliate product records and best-price selection.
//!
//! Products come straight from the upstream feed, so every field is optional
//! and prices may arrive either as JSON numbers or as decimal strings. The
//! selector never fails: a price that cannot be read is treated as `NaN` and
//! ranks behind every readable price.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single product listing as returned by the affiliate feed.
///
/// Fields keep the raw JSON the feed sent, so a listing with an odd type in
/// one field still takes part in the search. A field that is missing is
/// `None`; a field sent as `null` is `Some(Value::Null)` and is echoed back as
/// `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    /// Used as the display name when `name` is blank.
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Value>,
    /// Raw price value, either `"19.99"` or `19.99`. Echoed back unchanged.
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub url: Option<Value>,
    /// Used as the link when `url` is blank.
    #[serde(default, deserialize_with = "present")]
    pub affiliate_link: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub merchant_name: Option<Value>,
}

/// Keeps an explicit `null` distinct from a missing field.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Product {
    /// Numeric price used for comparison. See [`parse_price`].
    #[must_use]
    pub fn parsed_price(&self) -> f64 {
        self.price.as_ref().map_or(f64::NAN, parse_price)
    }
}

/// The cheapest product, shaped for the search response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<Value>,
}

impl BestProduct {
    /// Maps a feed product to its display form.
    ///
    /// `name` falls back to `title` and `link` falls back from `url` to
    /// `affiliate_link` when the primary field is missing, `null` or an empty
    /// string. Values of any other type are echoed as-is.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: first_present(product.name.as_ref(), product.title.as_ref()),
            price: product.price.clone(),
            link: first_present(product.url.as_ref(), product.affiliate_link.as_ref()),
            merchant: product.merchant_name.clone(),
        }
    }
}

fn first_present(primary: Option<&Value>, fallback: Option<&Value>) -> Option<Value> {
    primary.filter(|v| !is_blank(v)).or(fallback).cloned()
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Reads a price from a raw feed value.
///
/// Numbers are used as-is. Strings are read by their longest leading decimal
/// prefix after leading whitespace, so `"5 INR"` reads as `5.0`. Everything
/// else reads as `NaN`.
#[must_use]
pub fn parse_price(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_leading_float(s),
        _ => f64::NAN,
    }
}

fn parse_leading_float(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Orders two parsed prices, ranking `NaN` after every number.
///
/// Two `NaN`s compare equal so the earlier product keeps its place.
#[must_use]
pub fn compare_prices(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Returns the product with the lowest parsed price.
///
/// Ties go to the earliest product. When no price is readable the first
/// product is returned. `None` only for an empty slice.
#[must_use]
pub fn select_best(products: &[Product]) -> Option<&Product> {
    products
        .iter()
        .map(|p| (p, p.parsed_price()))
        .min_by(|(_, a), (_, b)| compare_prices(*a, *b))
        .map(|(p, _)| p)
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
