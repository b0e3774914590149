//! Cart API Module
//!
//! 当前购物车接口。所有操作都返回更新后的购物车视图。

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

/// Cart router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get).delete(handler::clear))
        .route("/items", post(handler::add_item))
        .route(
            "/items/{id}",
            patch(handler::change_quantity).delete(handler::remove_item),
        )
}
