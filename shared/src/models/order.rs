//! Order Model
//!
//! An order is the immutable bill produced when a cart is confirmed.
//! Items and total are snapshots taken at confirmation time and are
//! never recomputed, even if catalog prices change later — bills are
//! historical records. The only sanctioned mutation is attaching a
//! payment method, which overwrites on repeat (last write wins).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartLine;

/// A confirmed order (bill)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Strictly increasing id from a persisted counter, unique across
    /// the sales log
    pub order_id: u64,
    /// Confirmation instant, Unix milliseconds (UTC)
    pub date: i64,
    /// Cart line snapshot at confirmation time
    pub items: Vec<CartLine>,
    /// Sum of line totals at confirmation time
    pub total: Decimal,
    /// Restaurant name snapshot
    pub restaurant_name: String,
    /// Payment method, settable after confirmation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl Order {
    /// Recompute the total from the item snapshots.
    ///
    /// Equals `total` by construction; used by tests and integrity
    /// checks, never to rewrite a stored bill.
    pub fn computed_total(&self) -> Decimal {
        self.items.iter().map(CartLine::line_total).sum()
    }

    /// Total unit count across the item snapshots
    pub fn item_count(&self) -> i32 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// Payment method for display, with the "not available" placeholder
    pub fn payment_method_display(&self) -> &str {
        self.payment_method.as_deref().unwrap_or("N/A")
    }

    /// Confirmation instant as a UTC datetime
    pub fn date_utc(&self) -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::from_timestamp_millis(self.date).unwrap_or_default()
    }
}
