//! Cart API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{Cart, CartLine};

use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

/// Cart view returned by every cart operation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total: Decimal,
    pub item_count: i32,
}

impl From<Cart> for CartView {
    fn from(cart: Cart) -> Self {
        Self {
            total: cart.total(),
            item_count: cart.item_count(),
            lines: cart.snapshot_lines(),
        }
    }
}

/// Add item payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItem {
    pub item_id: u32,
}

/// Quantity adjustment payload
#[derive(Debug, Deserialize)]
pub struct ChangeQuantity {
    pub delta: i32,
}

/// Current cart
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<AppResponse<CartView>>> {
    Ok(ok(state.cart.get()?.into()))
}

/// Add one unit of a menu item (unknown ids are a no-op)
pub async fn add_item(
    State(state): State<ServerState>,
    Json(payload): Json<AddItem>,
) -> AppResult<Json<AppResponse<CartView>>> {
    Ok(ok(state.cart.add_item(payload.item_id)?.into()))
}

/// Adjust a line's quantity; dropping to zero or below removes it
pub async fn change_quantity(
    State(state): State<ServerState>,
    Path(id): Path<u32>,
    Json(payload): Json<ChangeQuantity>,
) -> AppResult<Json<AppResponse<CartView>>> {
    Ok(ok(state.cart.change_quantity(id, payload.delta)?.into()))
}

/// Remove a line entirely
pub async fn remove_item(
    State(state): State<ServerState>,
    Path(id): Path<u32>,
) -> AppResult<Json<AppResponse<CartView>>> {
    Ok(ok(state.cart.remove_item(id)?.into()))
}

/// Empty the cart
pub async fn clear(State(state): State<ServerState>) -> AppResult<Json<AppResponse<CartView>>> {
    Ok(ok(state.cart.clear()?.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::*;

    #[tokio::test]
    async fn add_and_adjust_through_the_api() {
        let state = ServerState::for_tests();

        let view = add_item(State(state.clone()), Json(AddItem { item_id: 1 }))
            .await
            .unwrap()
            .0
            .data
            .unwrap();
        assert_eq!(view.item_count, 1);
        assert_eq!(view.total, Decimal::from_str("5.00").unwrap());

        let view = change_quantity(State(state.clone()), Path(1), Json(ChangeQuantity { delta: 2 }))
            .await
            .unwrap()
            .0
            .data
            .unwrap();
        assert_eq!(view.item_count, 3);

        let view = remove_item(State(state.clone()), Path(1))
            .await
            .unwrap()
            .0
            .data
            .unwrap();
        assert!(view.lines.is_empty());
        assert_eq!(view.total, Decimal::ZERO);
    }

    #[tokio::test]
    async fn unknown_item_is_a_quiet_noop() {
        let state = ServerState::for_tests();
        let view = add_item(State(state), Json(AddItem { item_id: 404 }))
            .await
            .unwrap()
            .0
            .data
            .unwrap();
        assert!(view.lines.is_empty());
    }
}
