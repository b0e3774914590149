//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu item entity (catalog entry)
///
/// Ids are assigned by the catalog store from a persisted counter and
/// are monotonically increasing. Editing a menu item never touches
/// historical orders: cart lines snapshot name/price/image at add time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: u32,
    pub name: String,
    /// Unit price, non-negative
    pub price: Decimal,
    pub category: String,
    /// Image URL or embedded data URL
    #[serde(default)]
    pub image: String,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub price: Decimal,
    pub category: String,
    #[serde(default)]
    pub image: String,
}

/// Update menu item payload (partial)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MenuItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl MenuItem {
    /// Apply a partial update in place, keeping the id
    pub fn apply_update(&mut self, update: MenuItemUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
    }
}
