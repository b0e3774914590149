//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::models::Order;

use crate::core::ServerState;
use crate::utils::validation::{MAX_PAYMENT_METHOD_LEN, validate_required_text};
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Payment method payload
#[derive(Debug, Deserialize)]
pub struct AttachPayment {
    pub method: String,
}

/// The whole sales log, chronological
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<Order>>>> {
    Ok(ok(state.storage.all_orders()?))
}

/// One logged order
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = state
        .storage
        .get_order(id)?
        .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;
    Ok(ok(order))
}

/// Confirm the current cart into an order.
///
/// The cart stays as-is afterwards; it is only cleared by starting a
/// new order.
pub async fn confirm(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Order>>> {
    Ok(ok(state.orders.confirm_order()?))
}

/// The current bill, 404 when nothing has been confirmed yet
pub async fn current(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Order>>> {
    let bill = state
        .orders
        .recall_current_bill()
        .ok_or_else(|| AppError::not_found("No current bill"))?;
    Ok(ok(bill))
}

/// Attach or replace the payment method on the current bill
pub async fn attach_payment(
    State(state): State<ServerState>,
    Json(payload): Json<AttachPayment>,
) -> AppResult<Json<AppResponse<Order>>> {
    validate_required_text(&payload.method, "method", MAX_PAYMENT_METHOD_LEN)?;
    Ok(ok(state.orders.attach_payment_method(&payload.method)?))
}

/// Start a new order: clears the cart and drops the current bill
pub async fn start_new(State(state): State<ServerState>) -> AppResult<Json<AppResponse<()>>> {
    state.orders.start_new_order()?;
    Ok(ok(()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn confirm_empty_cart_maps_to_empty_cart_error() {
        let state = ServerState::for_tests();
        assert!(matches!(
            confirm(State(state)).await,
            Err(AppError::EmptyCart)
        ));
    }

    #[tokio::test]
    async fn checkout_flow_through_the_api() {
        let state = ServerState::for_tests();
        state.cart.add_item(1).unwrap();

        let order = confirm(State(state.clone())).await.unwrap().0.data.unwrap();
        let bill = current(State(state.clone())).await.unwrap().0.data.unwrap();
        assert_eq!(bill.order_id, order.order_id);

        let paid = attach_payment(
            State(state.clone()),
            Json(AttachPayment {
                method: "Cash".to_string(),
            }),
        )
        .await
        .unwrap()
        .0
        .data
        .unwrap();
        assert_eq!(paid.payment_method.as_deref(), Some("Cash"));

        let reset = start_new(State(state.clone())).await.unwrap();
        assert!(reset.0.success);
        assert!(matches!(
            current(State(state.clone())).await,
            Err(AppError::NotFound(_))
        ));

        // The log keeps the settled order
        let log = list(State(state)).await.unwrap().0.data.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].payment_method.as_deref(), Some("Cash"));
    }

    #[tokio::test]
    async fn blank_payment_method_is_rejected() {
        let state = ServerState::for_tests();
        state.cart.add_item(1).unwrap();
        let confirmed = confirm(State(state.clone())).await.unwrap();
        assert!(confirmed.0.success);

        assert!(matches!(
            attach_payment(
                State(state),
                Json(AttachPayment {
                    method: "  ".to_string()
                })
            )
            .await,
            Err(AppError::Validation(_))
        ));
    }
}
