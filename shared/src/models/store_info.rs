//! Store Info Model (Singleton)
//!
//! One record per deployment: the restaurant name shown on bills and
//! reports.

use serde::{Deserialize, Serialize};

/// Default restaurant name used until the operator sets one
pub const DEFAULT_RESTAURANT_NAME: &str = "Restaurant";

/// Store info entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreInfo {
    pub name: String,
}

impl Default for StoreInfo {
    fn default() -> Self {
        Self {
            name: DEFAULT_RESTAURANT_NAME.to_string(),
        }
    }
}

/// Update store info payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreInfoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
