//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`menu_items`] - 菜单管理接口
//! - [`cart`] - 购物车接口
//! - [`orders`] - 订单确认与账单接口
//! - [`reports`] - 销售报表与导出接口
//! - [`store_info`] - 门店信息接口

pub mod cart;
pub mod health;
pub mod menu_items;
pub mod orders;
pub mod reports;
pub mod store_info;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
