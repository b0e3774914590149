//! redb-based persistence for the POS
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `menu_items` | `u32` | JSON `MenuItem` | Menu catalog |
//! | `sales_log` | `u64` (order id) | JSON `Order` | Append-only sales log |
//! | `app_state` | `&str` | JSON blob | Current cart, store info |
//! | `counters` | `&str` | `u64` | Menu item id / order id counters |
//!
//! Order ids come from a strictly increasing persisted counter, so key
//! order in `sales_log` is confirmation order and a full-table scan
//! yields the log chronologically.
//!
//! # Durability
//!
//! redb commits are durable once `commit()` returns (copy-on-write with
//! atomic pointer swap), so a failed persist leaves the previous state
//! intact — callers re-read on retry and never observe a torn cart or
//! half-appended order.

use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use rust_decimal::Decimal;
use shared::models::{Cart, MenuItem, MenuItemCreate, MenuItemUpdate, Order, StoreInfo};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Menu catalog: key = menu item id, value = JSON-serialized MenuItem
const MENU_TABLE: TableDefinition<u32, &[u8]> = TableDefinition::new("menu_items");

/// Sales log: key = order id, value = JSON-serialized Order (append-only)
const SALES_LOG_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("sales_log");

/// Small singleton blobs: key = state name, value = JSON
const APP_STATE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("app_state");

/// Monotonic counters: key = counter name, value = last issued value
const COUNTERS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("counters");

const CART_KEY: &str = "current_cart";
const STORE_INFO_KEY: &str = "store_info";
const MENU_ID_KEY: &str = "menu_item_id";
const ORDER_ID_KEY: &str = "order_id";

/// Storage errors
///
/// Everything except `OrderNotFound` maps to the recoverable
/// "storage unavailable" failure surfaced to API callers.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Order not found: {0}")]
    OrderNotFound(u64),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// POS storage backed by redb
#[derive(Clone)]
pub struct PosStorage {
    db: Arc<Database>,
}

impl PosStorage {
    /// Open or create the database at the given path.
    ///
    /// Initializes all tables and, on a fresh database, seeds the
    /// default menu and store info.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        let storage = Self { db: Arc::new(db) };
        storage.initialize()?;
        Ok(storage)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let storage = Self { db: Arc::new(db) };
        storage.initialize()?;
        Ok(storage)
    }

    fn initialize(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(SALES_LOG_TABLE)?;
            let _ = write_txn.open_table(APP_STATE_TABLE)?;
            let _ = write_txn.open_table(COUNTERS_TABLE)?;

            let mut menu_table = write_txn.open_table(MENU_TABLE)?;
            if menu_table.is_empty()? {
                let mut last_id = 0u32;
                for item in default_menu() {
                    let value = serde_json::to_vec(&item)?;
                    menu_table.insert(item.id, value.as_slice())?;
                    last_id = item.id;
                }
                let mut counters = write_txn.open_table(COUNTERS_TABLE)?;
                if counters.get(MENU_ID_KEY)?.is_none() {
                    counters.insert(MENU_ID_KEY, last_id as u64)?;
                }
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    // ========== Counters ==========

    fn next_counter(&self, key: &str) -> StorageResult<u64> {
        let txn = self.db.begin_write()?;
        let next = {
            let mut table = txn.open_table(COUNTERS_TABLE)?;
            let current = table.get(key)?.map(|g| g.value()).unwrap_or(0);
            let next = current + 1;
            table.insert(key, next)?;
            next
        };
        txn.commit()?;
        Ok(next)
    }

    /// Issue the next order id (strictly increasing, persisted)
    pub fn next_order_id(&self) -> StorageResult<u64> {
        self.next_counter(ORDER_ID_KEY)
    }

    // ========== Menu Catalog ==========

    /// All menu items, ascending by id
    pub fn list_menu_items(&self) -> StorageResult<Vec<MenuItem>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MENU_TABLE)?;

        let mut items = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            items.push(serde_json::from_slice(value.value())?);
        }
        Ok(items)
    }

    /// Get a single menu item by id
    pub fn get_menu_item(&self, id: u32) -> StorageResult<Option<MenuItem>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(MENU_TABLE)?;
        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Create a menu item with a counter-assigned id
    pub fn insert_menu_item(&self, payload: MenuItemCreate) -> StorageResult<MenuItem> {
        let id = self.next_counter(MENU_ID_KEY)? as u32;
        let item = MenuItem {
            id,
            name: payload.name,
            price: payload.price,
            category: payload.category,
            image: payload.image,
        };

        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(MENU_TABLE)?;
            let value = serde_json::to_vec(&item)?;
            table.insert(item.id, value.as_slice())?;
        }
        txn.commit()?;
        Ok(item)
    }

    /// Update a menu item in place; returns None when the id is unknown
    pub fn update_menu_item(
        &self,
        id: u32,
        update: MenuItemUpdate,
    ) -> StorageResult<Option<MenuItem>> {
        let txn = self.db.begin_write()?;
        let updated = {
            let mut table = txn.open_table(MENU_TABLE)?;
            let existing = match table.get(id)? {
                Some(guard) => Some(serde_json::from_slice::<MenuItem>(guard.value())?),
                None => None,
            };
            match existing {
                Some(mut item) => {
                    item.apply_update(update);
                    let value = serde_json::to_vec(&item)?;
                    table.insert(id, value.as_slice())?;
                    Some(item)
                }
                None => None,
            }
        };
        txn.commit()?;
        Ok(updated)
    }

    /// Delete a menu item; returns whether it existed
    pub fn delete_menu_item(&self, id: u32) -> StorageResult<bool> {
        let txn = self.db.begin_write()?;
        let removed = {
            let mut table = txn.open_table(MENU_TABLE)?;
            table.remove(id)?.is_some()
        };
        txn.commit()?;
        Ok(removed)
    }

    // ========== Cart ==========

    /// Load the current cart (empty when none has been saved)
    pub fn load_cart(&self) -> StorageResult<Cart> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(APP_STATE_TABLE)?;
        match table.get(CART_KEY)? {
            Some(guard) => Ok(serde_json::from_slice(guard.value())?),
            None => Ok(Cart::new()),
        }
    }

    /// Persist the current cart
    pub fn save_cart(&self, cart: &Cart) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(APP_STATE_TABLE)?;
            let value = serde_json::to_vec(cart)?;
            table.insert(CART_KEY, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    // ========== Sales Log ==========

    /// Append a confirmed order to the sales log
    pub fn append_order(&self, order: &Order) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(SALES_LOG_TABLE)?;
            let value = serde_json::to_vec(order)?;
            table.insert(order.order_id, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// The full sales log, in confirmation order
    pub fn all_orders(&self) -> StorageResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SALES_LOG_TABLE)?;

        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            orders.push(serde_json::from_slice(value.value())?);
        }
        Ok(orders)
    }

    /// Get one order by id
    pub fn get_order(&self, order_id: u64) -> StorageResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SALES_LOG_TABLE)?;
        match table.get(order_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Attach a payment method to a logged order.
    ///
    /// The one sanctioned mutation of a bill; overwrites on repeat
    /// (last write wins). Items, total and date are never rewritten.
    pub fn set_payment_method(&self, order_id: u64, method: &str) -> StorageResult<Order> {
        let txn = self.db.begin_write()?;
        let order = {
            let mut table = txn.open_table(SALES_LOG_TABLE)?;
            let mut order: Order = match table.get(order_id)? {
                Some(guard) => serde_json::from_slice(guard.value())?,
                None => return Err(StorageError::OrderNotFound(order_id)),
            };
            order.payment_method = Some(method.to_string());
            let value = serde_json::to_vec(&order)?;
            table.insert(order_id, value.as_slice())?;
            order
        };
        txn.commit()?;
        Ok(order)
    }

    // ========== Store Info ==========

    /// Store info singleton (defaults until the operator sets a name)
    pub fn store_info(&self) -> StorageResult<StoreInfo> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(APP_STATE_TABLE)?;
        match table.get(STORE_INFO_KEY)? {
            Some(guard) => Ok(serde_json::from_slice(guard.value())?),
            None => Ok(StoreInfo::default()),
        }
    }

    pub fn set_store_info(&self, info: &StoreInfo) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(APP_STATE_TABLE)?;
            let value = serde_json::to_vec(info)?;
            table.insert(STORE_INFO_KEY, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }
}

/// Default menu seeded on first start
fn default_menu() -> Vec<MenuItem> {
    let breakfast = |id: u32, name: &str, price: i64| MenuItem {
        id,
        name: name.to_string(),
        price: Decimal::new(price, 2),
        category: "Breakfast".to_string(),
        image: String::new(),
    };
    vec![
        breakfast(1, "Idly", 500),
        breakfast(2, "Dosai", 800),
        breakfast(3, "Poori", 600),
        breakfast(4, "Vada", 400),
    ]
}
