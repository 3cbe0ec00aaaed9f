//! Result assembly: totals are always derived from the items.

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::receipt::{ExtractedItem, ParseResult};

use super::rules::amounts::{format_price, price_value};

/// Sum of the numeric value of every item price. Empty or non-numeric
/// prices count as zero, and a price that would overflow the sum is left out.
pub fn sum_prices(items: &[ExtractedItem]) -> Decimal {
    items.iter().fold(Decimal::ZERO, |sum, item| {
        let value = price_value(&item.price);
        sum.checked_add(value).unwrap_or_else(|| {
            warn!("Price {} overflows the total, leaving it out", item.price);
            sum
        })
    })
}

/// Assemble a result with a won-formatted total.
pub fn normalize(order_id: String, items: Vec<ExtractedItem>) -> ParseResult {
    normalize_with(order_id, items, "₩")
}

/// Assemble a result, formatting the total with `symbol`. The total is empty
/// unless the sum is strictly positive.
pub fn normalize_with(order_id: String, items: Vec<ExtractedItem>, symbol: &str) -> ParseResult {
    let sum = sum_prices(&items);
    let total_price = if sum > Decimal::ZERO {
        format_price(sum, symbol)
    } else {
        String::new()
    };

    ParseResult {
        order_id,
        total_price,
        items,
    }
}
