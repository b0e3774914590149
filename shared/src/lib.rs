//! Shared types for the Tiffin POS
//!
//! Domain models used by the server and its clients: catalog entries,
//! the working cart, confirmed orders, and sales report structures.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::cart::{Cart, CartLine};
pub use models::menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use models::order::Order;
pub use models::report::{
    DailySummary, OrderDetail, PopularItem, ReportScope, SalesReport,
};
pub use models::store_info::{StoreInfo, StoreInfoUpdate};
