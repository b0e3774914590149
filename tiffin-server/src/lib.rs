//! Tiffin POS Server - 轻量级餐厅销售点后端
//!
//! # 架构概述
//!
//! 单体 HTTP 服务，嵌入式存储，为一家餐厅服务：
//!
//! - **菜单目录** (`api/menu_items`): 菜品 CRUD
//! - **购物车** (`cart`): 当前购物车的持久化操作
//! - **订单** (`orders`): 确认、当前账单、支付方式
//! - **报表** (`reports`): 月报/日报聚合、CSV 导出
//! - **中继** (`relay`): 每日报表推送到外部通知服务
//!
//! # 模块结构
//!
//! ```text
//! tiffin-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── storage/       # 嵌入式数据库 (redb)
//! ├── cart/          # 购物车服务
//! ├── orders/        # 订单确认与账单
//! ├── reports/       # 销售报表引擎
//! ├── relay/         # 报表中继 worker
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志、时间、校验
//! ```

pub mod api;
pub mod cart;
pub mod core;
pub mod orders;
pub mod relay;
pub mod reports;
pub mod storage;
pub mod utils;

// Re-export 公共类型
pub use cart::CartService;
pub use core::{Config, Server, ServerState};
pub use orders::{CheckoutStage, OrdersManager, SalesEvent};
pub use storage::PosStorage;
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境: dotenv + 日志
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
  ______ _  ____ ____ _
 /_  __/(_)/ __// __/(_)___
  / /  / // /_ / /_ / // _ \
 / /  / // __// __// // // /
/_/  /_//_/  /_/  /_//_//_/
        P O S
    "#
    );
}
