//! Cart Model
//!
//! The working set of items pending purchase. A cart holds at most one
//! line per menu item id; repeat adds increment the quantity, and a
//! quantity dropping to zero or below removes the line entirely. Line
//! order is insertion order and is preserved through quantity changes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::menu_item::MenuItem;

/// One cart line: a quantity of a single menu item.
///
/// Name, price and image are denormalized snapshots taken at add time,
/// so later catalog edits do not rewrite carts or historical bills.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub item_id: u32,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    pub quantity: i32,
}

impl CartLine {
    /// Line total (price x quantity)
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The current cart: an ordered sequence of cart lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a menu item, snapshotting name/price/image.
    ///
    /// If a line for the item already exists its quantity is
    /// incremented; the line keeps its original snapshot and position.
    pub fn add_item(&mut self, item: &MenuItem) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                item_id: item.id,
                name: item.name.clone(),
                price: item.price,
                image: item.image.clone(),
                quantity: 1,
            });
        }
    }

    /// Adjust a line's quantity by `delta`.
    ///
    /// No-op when no line matches. A resulting quantity <= 0 removes
    /// the line (a cart never holds a non-positive quantity). The
    /// addition saturates, so an extreme delta pins the quantity at the
    /// i32 bound instead of wrapping.
    pub fn change_quantity(&mut self, item_id: u32, delta: i32) {
        let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) else {
            return;
        };
        line.quantity = line.quantity.saturating_add(delta);
        if line.quantity <= 0 {
            self.remove_item(item_id);
        }
    }

    /// Remove the line for `item_id` if present; no-op otherwise.
    pub fn remove_item(&mut self, item_id: u32) {
        self.lines.retain(|l| l.item_id != item_id);
    }

    /// Sum of price x quantity over all lines (0 for an empty cart).
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total unit count (sum of quantities, not distinct lines).
    pub fn item_count(&self) -> i32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Snapshot the lines for an immutable order record.
    pub fn snapshot_lines(&self) -> Vec<CartLine> {
        self.lines.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::*;

    fn item(id: u32, name: &str, price: &str) -> MenuItem {
        MenuItem {
            id,
            name: name.to_string(),
            price: Decimal::from_str(price).unwrap(),
            category: "Breakfast".to_string(),
            image: String::new(),
        }
    }

    fn no_duplicate_lines(cart: &Cart) -> bool {
        let mut ids: Vec<u32> = cart.lines().iter().map(|l| l.item_id).collect();
        ids.sort_unstable();
        ids.windows(2).all(|w| w[0] != w[1])
    }

    #[test]
    fn add_item_merges_lines() {
        let mut cart = Cart::new();
        let idly = item(1, "Idly", "5.00");

        cart.add_item(&idly);
        cart.add_item(&idly);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total(), Decimal::from_str("10.00").unwrap());
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn add_item_snapshots_price_at_add_time() {
        let mut cart = Cart::new();
        let mut dosai = item(2, "Dosai", "8.00");
        cart.add_item(&dosai);

        // Later catalog price change must not affect the existing line
        dosai.price = Decimal::from_str("9.50").unwrap();
        cart.add_item(&dosai);

        assert_eq!(cart.lines()[0].price, Decimal::from_str("8.00").unwrap());
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn change_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, "Idly", "5.00"));
        cart.add_item(&item(2, "Dosai", "8.00"));

        cart.change_quantity(1, -1);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].item_id, 2);
    }

    #[test]
    fn change_quantity_missing_item_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, "Idly", "5.00"));

        cart.change_quantity(99, 3);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn change_quantity_saturates_at_the_i32_bound() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, "Idly", "5.00"));

        // An extreme delta must pin at i32::MAX, never wrap negative
        // (which would silently drop the line)
        cart.change_quantity(1, i32::MAX);
        assert_eq!(cart.lines()[0].quantity, i32::MAX);

        cart.change_quantity(1, i32::MIN);
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_missing_item_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&item(1, "Idly", "5.00"));

        cart.remove_item(99);

        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn empty_cart_total_is_zero() {
        let cart = Cart::new();
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut cart = Cart::new();
        cart.add_item(&item(3, "Poori", "6.00"));
        cart.add_item(&item(1, "Idly", "5.00"));
        cart.add_item(&item(3, "Poori", "6.00"));

        let ids: Vec<u32> = cart.lines().iter().map(|l| l.item_id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn invariants_hold_under_mixed_operations() {
        let mut cart = Cart::new();
        let items = [
            item(1, "Idly", "5.00"),
            item(2, "Dosai", "8.00"),
            item(3, "Poori", "6.00"),
        ];

        // Arbitrary interleaving of adds, quantity changes and removes
        for round in 0..50 {
            let it = &items[round % 3];
            cart.add_item(it);
            if round % 4 == 0 {
                cart.change_quantity(it.id, -3);
            }
            if round % 7 == 0 {
                cart.remove_item(items[(round + 1) % 3].id);
            }
            if round % 5 == 0 {
                cart.change_quantity(items[(round + 2) % 3].id, 2);
            }

            assert!(no_duplicate_lines(&cart), "duplicate line at round {round}");
            assert!(
                cart.lines().iter().all(|l| l.quantity >= 1),
                "non-positive quantity at round {round}"
            );
        }
    }
}
