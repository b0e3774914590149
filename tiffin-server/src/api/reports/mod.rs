//! Report API Module
//!
//! 销售报表查询、CSV 导出与报表发送接口。
//!
//! 月报/日报默认当前月份/当天 (UTC)；页码越界时收拢到有效范围，
//! 导出空数据集返回 404。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Report router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/monthly", get(handler::monthly))
        .route("/monthly/export", get(handler::export_monthly))
        .route("/daily", get(handler::daily))
        .route("/daily/export", get(handler::export_daily))
        .route("/send-daily", post(handler::send_daily))
}
