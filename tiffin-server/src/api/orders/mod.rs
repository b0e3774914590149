//! Order API Module
//!
//! 订单确认与当前账单接口。销售日志只追加，唯一的事后修改是
//! 给订单补记支付方式。

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Full sales log, chronological
        .route("/", get(handler::list))
        // Confirm the current cart into an order
        .route("/confirm", post(handler::confirm))
        // The current bill (most recently confirmed order)
        .route("/current", get(handler::current))
        // Attach or replace the payment method on the current bill
        .route("/current/payment", put(handler::attach_payment))
        // Start a fresh order: clears cart and current bill
        .route("/new", post(handler::start_new))
        .route("/{id}", get(handler::get_by_id))
}
