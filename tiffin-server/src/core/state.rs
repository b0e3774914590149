use std::sync::Arc;

use anyhow::Context;

use crate::cart::CartService;
use crate::core::Config;
use crate::orders::OrdersManager;
use crate::relay::{HttpRelay, ReportRelay};
use crate::storage::PosStorage;

/// 服务器状态 - 持有所有服务的共享引用
///
/// Clone 成本极低：存储和订单管理内部都是 Arc。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | storage | PosStorage | 嵌入式数据库 (redb) |
/// | cart | CartService | 购物车服务 |
/// | orders | OrdersManager | 订单确认与账单 |
/// | relay | Option<Arc<dyn ReportRelay>> | 报表中继 (未配置时为 None) |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库
    pub storage: PosStorage,
    /// 购物车服务
    pub cart: CartService,
    /// 订单确认与当前账单
    pub orders: OrdersManager,
    /// 报表中继 (RELAY_URL 未配置时为 None)
    pub relay: Option<Arc<dyn ReportRelay>>,
}

impl ServerState {
    /// 初始化服务器状态：建工作目录、打开数据库、装配服务
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        let db_path = config.database_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::create_dir_all(config.log_dir())
            .with_context(|| format!("failed to create {}", config.log_dir().display()))?;

        let storage = PosStorage::open(&db_path)
            .with_context(|| format!("failed to open database at {}", db_path.display()))?;

        let relay: Option<Arc<dyn ReportRelay>> = config
            .relay_url
            .as_deref()
            .map(|url| Arc::new(HttpRelay::new(url)) as Arc<dyn ReportRelay>);

        Ok(Self {
            config: config.clone(),
            storage: storage.clone(),
            cart: CartService::new(storage.clone()),
            orders: OrdersManager::new(storage),
            relay,
        })
    }

    /// In-memory state for handler tests
    #[cfg(test)]
    pub fn for_tests() -> Self {
        let storage = PosStorage::open_in_memory().expect("in-memory storage");
        Self {
            config: Config::with_overrides("/tmp/tiffin-test", 0),
            storage: storage.clone(),
            cart: CartService::new(storage.clone()),
            orders: OrdersManager::new(storage),
            relay: None,
        }
    }
}
