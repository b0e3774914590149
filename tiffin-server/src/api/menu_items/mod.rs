//! Menu Item API Module
//!
//! 菜单目录的 CRUD 接口。删除菜品不影响历史订单和购物车快照。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Menu item router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu-items", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/categories", get(handler::categories))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::remove),
        )
}
