//! Store Info API Module
//!
//! 门店信息接口。门店名只影响新订单和报表抬头，历史订单保留
//! 确认时的快照。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Store info router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/store-info", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::get).put(handler::update))
}
