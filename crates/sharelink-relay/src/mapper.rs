//! Reshaping of upstream product records into [`RelayItem`]s.
//!
//! Malformed field values never fail the response: a value that cannot be
//! normalized is passed through unchanged.

use serde_json::{Number, Value};

use crate::types::{RelayItem, UpstreamProduct};

/// Maps raw `cart.prodList` entries to relay items, preserving order.
///
/// The iterator is lazy; entries that are not JSON objects map to an item
/// with every field `null`.
pub fn map_products(products: Vec<Value>) -> impl Iterator<Item = RelayItem> {
    products.into_iter().map(|raw| {
        let product = serde_json::from_value::<UpstreamProduct>(raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "upstream product entry is not an object");
            UpstreamProduct::default()
        });
        map_product(product)
    })
}

/// Maps a single upstream product.
#[must_use]
pub fn map_product(product: UpstreamProduct) -> RelayItem {
    let name = product
        .display_name
        .filter(|v| !v.as_str().is_some_and(str::is_empty))
        .or(product.prod_name);

    // Presence check only: a list price of 0 is a real price.
    let retail_price = product
        .list_price_raw_amount
        .or(product.retail_price_raw_amount);

    RelayItem {
        img: product.front_img,
        name,
        sku: product.pid,
        retail_price,
        sale_price: product.list_price_post_discount_raw_amount,
        skucode: product.pn,
        quantity: product.prod_qty.map(normalize_quantity),
        weight: product.ship_weight_lbs.map(normalize_weight),
    }
}

/// Keeps only the digits of `raw` and returns them as an integer, or `raw`
/// unchanged when no digits remain or the value overflows `u64`.
#[must_use]
pub fn normalize_quantity(raw: Value) -> Value {
    let digits: String = stringify(&raw).chars().filter_map(ascii_digit).collect();
    match digits.parse::<u64>() {
        Ok(quantity) => Value::from(quantity),
        Err(_) => raw,
    }
}

/// Drops thousands separators from `raw` and returns it as a float, or
/// `raw` unchanged when it does not parse to a finite number.
#[must_use]
pub fn normalize_weight(raw: Value) -> Value {
    let cleaned = stringify(&raw).replace(',', "");
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or(raw, Value::Number)
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Maps ASCII, Arabic-Indic and Eastern Arabic-Indic digits to ASCII.
/// The upstream is queried with an Arabic locale.
fn ascii_digit(c: char) -> Option<char> {
    let offset = match c {
        '0'..='9' => return Some(c),
        '\u{0660}'..='\u{0669}' => u32::from(c) - 0x0660,
        '\u{06F0}'..='\u{06F9}' => u32::from(c) - 0x06F0,
        _ => return None,
    };
    char::from_digit(offset, 10)
}

#[cfg(test)]
#[path = "mapper_test.rs"]
mod tests;
