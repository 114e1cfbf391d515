//! Low-stock classification.

use crate::item::Quantity;

/// Quantity boundary below which an item is flagged for attention.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 4;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StockLevel {
    Low,
    Ok,
}

pub fn classify(quantity: Quantity, threshold: i64) -> StockLevel {
    if quantity.is_low(threshold) {
        StockLevel::Low
    } else {
        StockLevel::Ok
    }
}
