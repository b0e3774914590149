//! Data models
//!
//! Shared between tiffin-server and frontend (via API).
//! All monetary values are `rust_decimal::Decimal`, serialized as JSON
//! numbers (`serde-with-float`). Timestamps are Unix milliseconds.

pub mod cart;
pub mod menu_item;
pub mod order;
pub mod report;
pub mod store_info;

// Re-exports
pub use cart::*;
pub use menu_item::*;
pub use order::*;
pub use report::*;
pub use store_info::*;
