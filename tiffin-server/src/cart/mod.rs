//! Cart service
//!
//! Orchestrates the persisted working cart: every operation is a
//! read-modify-write on the stored cart, so a failed persist leaves the
//! previous state intact (the mutation happens on a loaded copy).
//!
//! Missing menu item references are silent no-ops, never errors — the
//! caller simply gets the unchanged cart back.

use shared::models::Cart;
use tracing::debug;

use crate::storage::{PosStorage, StorageResult};

/// Cart operations over the persisted current cart
#[derive(Clone)]
pub struct CartService {
    storage: PosStorage,
}

impl CartService {
    pub fn new(storage: PosStorage) -> Self {
        Self { storage }
    }

    /// The current cart
    pub fn get(&self) -> StorageResult<Cart> {
        self.storage.load_cart()
    }

    /// Add one unit of a menu item to the cart.
    ///
    /// Unknown item ids are ignored (no-op by design): the cart is
    /// returned unchanged and nothing is persisted.
    pub fn add_item(&self, item_id: u32) -> StorageResult<Cart> {
        let mut cart = self.storage.load_cart()?;

        let Some(item) = self.storage.get_menu_item(item_id)? else {
            debug!(item_id, "add_item ignored: menu item not found");
            return Ok(cart);
        };

        cart.add_item(&item);
        self.storage.save_cart(&cart)?;
        Ok(cart)
    }

    /// Adjust a line's quantity by `delta`; a resulting quantity <= 0
    /// removes the line. No-op when no line matches.
    pub fn change_quantity(&self, item_id: u32, delta: i32) -> StorageResult<Cart> {
        let mut cart = self.storage.load_cart()?;
        let before = cart.clone();

        cart.change_quantity(item_id, delta);
        if cart != before {
            self.storage.save_cart(&cart)?;
        }
        Ok(cart)
    }

    /// Remove the line for `item_id`; no-op when absent
    pub fn remove_item(&self, item_id: u32) -> StorageResult<Cart> {
        let mut cart = self.storage.load_cart()?;
        let before_len = cart.len();

        cart.remove_item(item_id);
        if cart.len() != before_len {
            self.storage.save_cart(&cart)?;
        }
        Ok(cart)
    }

    /// Empty the cart
    pub fn clear(&self) -> StorageResult<Cart> {
        let cart = Cart::new();
        self.storage.save_cart(&cart)?;
        Ok(cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::*;

    fn create_service() -> CartService {
        CartService::new(PosStorage::open_in_memory().unwrap())
    }

    #[test]
    fn add_item_snapshots_menu_item() {
        let service = create_service();

        let cart = service.add_item(1).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].name, "Idly");
        assert_eq!(cart.lines()[0].price, Decimal::from_str("5.00").unwrap());

        // Persisted, not just returned
        assert_eq!(service.get().unwrap(), cart);
    }

    #[test]
    fn add_unknown_item_is_silent_noop() {
        let service = create_service();
        service.add_item(1).unwrap();

        let cart = service.add_item(999).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn repeat_add_increments_quantity() {
        let service = create_service();
        service.add_item(2).unwrap();
        let cart = service.add_item(2).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total(), Decimal::from_str("16.00").unwrap());
    }

    #[test]
    fn change_quantity_below_one_removes_line() {
        let service = create_service();
        service.add_item(1).unwrap();
        service.add_item(2).unwrap();

        let cart = service.change_quantity(1, -1).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].item_id, 2);
        assert_eq!(service.get().unwrap(), cart);
    }

    #[test]
    fn change_quantity_missing_line_is_noop() {
        let service = create_service();
        service.add_item(1).unwrap();

        let cart = service.change_quantity(42, 5).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn clear_empties_persisted_cart() {
        let service = create_service();
        service.add_item(1).unwrap();
        service.add_item(2).unwrap();

        let cart = service.clear().unwrap();
        assert!(cart.is_empty());
        assert!(service.get().unwrap().is_empty());
    }
}
