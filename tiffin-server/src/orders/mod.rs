//! Order confirmation and billing
//!
//! Owns the checkout lifecycle: a cart becomes an immutable order on
//! confirmation, the confirmed order is held as the "current bill" until
//! a new order starts, and a payment method may be attached to it at any
//! point while (or after) it is current.
//!
//! Confirmation appends to the sales log first and only then updates the
//! in-memory bill slot, so a storage failure leaves no half-confirmed
//! state behind. Interested parties (the report relay) observe
//! confirmations through a broadcast channel instead of hooking the
//! storage layer.

use std::sync::Arc;

use parking_lot::RwLock;
use shared::models::Order;
use tokio::sync::broadcast;
use tracing::info;

use crate::storage::{PosStorage, StorageError};
use crate::utils::time::now_millis;

/// Broadcast capacity for sales events; a slow subscriber lagging past
/// this many events misses the oldest ones, which is acceptable for
/// report syncing.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Something happened to the sales log that observers may care about
#[derive(Debug, Clone)]
pub enum SalesEvent {
    /// An order was appended to the sales log
    OrderConfirmed { order_id: u64 },
    /// A payment method was attached to an order
    PaymentAttached { order_id: u64, method: String },
}

/// Where the current checkout stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    /// Cart is being assembled, nothing confirmed yet
    Building,
    /// An order is confirmed and current, awaiting payment
    Confirmed,
    /// The current order has a payment method attached
    Settled,
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// Confirming an empty cart is rejected, never logged
    #[error("cannot confirm an empty cart")]
    EmptyCart,

    /// Payment operations require a current bill
    #[error("no current bill")]
    NoCurrentBill,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Checkout lifecycle over the persisted cart and sales log
#[derive(Clone)]
pub struct OrdersManager {
    storage: PosStorage,
    /// The most recently confirmed order, until a new order starts
    current_bill: Arc<RwLock<Option<Order>>>,
    events: broadcast::Sender<SalesEvent>,
}

impl OrdersManager {
    pub fn new(storage: PosStorage) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            storage,
            current_bill: Arc::new(RwLock::new(None)),
            events,
        }
    }

    /// Subscribe to sales events
    pub fn subscribe(&self) -> broadcast::Receiver<SalesEvent> {
        self.events.subscribe()
    }

    /// Confirm the current cart into an order.
    ///
    /// Snapshots the cart lines and total, assigns the next order id,
    /// appends to the sales log and makes the order the current bill.
    /// The cart itself is NOT cleared: it stays visible until the
    /// operator explicitly starts a new order.
    pub fn confirm_order(&self) -> Result<Order, OrderError> {
        let cart = self.storage.load_cart()?;
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let store = self.storage.store_info()?;
        let order = Order {
            order_id: self.storage.next_order_id()?,
            date: now_millis(),
            items: cart.snapshot_lines(),
            total: cart.total(),
            restaurant_name: store.name,
            payment_method: None,
        };

        self.storage.append_order(&order)?;
        *self.current_bill.write() = Some(order.clone());

        info!(
            order_id = order.order_id,
            total = %order.total,
            items = order.items.len(),
            "order confirmed"
        );
        let _ = self.events.send(SalesEvent::OrderConfirmed {
            order_id: order.order_id,
        });

        Ok(order)
    }

    /// Attach (or replace) the payment method on the current bill.
    ///
    /// Last write wins; the rest of the logged order is untouched.
    pub fn attach_payment_method(&self, method: &str) -> Result<Order, OrderError> {
        let order_id = {
            let bill = self.current_bill.read();
            bill.as_ref()
                .map(|o| o.order_id)
                .ok_or(OrderError::NoCurrentBill)?
        };

        let updated = self.storage.set_payment_method(order_id, method)?;
        *self.current_bill.write() = Some(updated.clone());

        let _ = self.events.send(SalesEvent::PaymentAttached {
            order_id,
            method: method.to_string(),
        });

        Ok(updated)
    }

    /// The confirmed order currently on the bill, if any
    pub fn recall_current_bill(&self) -> Option<Order> {
        self.current_bill.read().clone()
    }

    /// Stage of the checkout in progress
    pub fn stage(&self) -> CheckoutStage {
        match self.current_bill.read().as_ref() {
            None => CheckoutStage::Building,
            Some(order) if order.payment_method.is_none() => CheckoutStage::Confirmed,
            Some(_) => CheckoutStage::Settled,
        }
    }

    /// Start a fresh order: clears the cart and drops the current bill.
    /// The sales log keeps everything already confirmed.
    pub fn start_new_order(&self) -> Result<(), OrderError> {
        self.storage.save_cart(&shared::models::Cart::new())?;
        *self.current_bill.write() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartService;

    fn setup() -> (OrdersManager, CartService, PosStorage) {
        let storage = PosStorage::open_in_memory().unwrap();
        (
            OrdersManager::new(storage.clone()),
            CartService::new(storage.clone()),
            storage,
        )
    }

    #[test]
    fn empty_cart_is_rejected_and_nothing_logged() {
        let (orders, _, storage) = setup();

        assert!(matches!(orders.confirm_order(), Err(OrderError::EmptyCart)));
        assert!(storage.all_orders().unwrap().is_empty());
        assert!(orders.recall_current_bill().is_none());
    }

    #[test]
    fn confirm_snapshots_cart_and_appends_exactly_once() {
        let (orders, cart, storage) = setup();
        cart.add_item(1).unwrap();
        cart.add_item(2).unwrap();
        cart.add_item(1).unwrap();

        let order = orders.confirm_order().unwrap();

        assert_eq!(order.total, cart.get().unwrap().total());
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.restaurant_name, "Restaurant");
        assert!(order.payment_method.is_none());

        let log = storage.all_orders().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0], order);
    }

    #[test]
    fn cart_survives_confirmation() {
        let (orders, cart, _) = setup();
        cart.add_item(3).unwrap();
        orders.confirm_order().unwrap();

        // Still visible until the operator starts a new order
        assert_eq!(cart.get().unwrap().len(), 1);
    }

    #[test]
    fn order_ids_strictly_increase_across_confirmations() {
        let (orders, cart, _) = setup();

        let mut previous = 0;
        for _ in 0..3 {
            cart.add_item(1).unwrap();
            let order = orders.confirm_order().unwrap();
            assert!(order.order_id > previous);
            previous = order.order_id;
            orders.start_new_order().unwrap();
        }
    }

    #[test]
    fn payment_requires_a_current_bill() {
        let (orders, _, _) = setup();
        assert!(matches!(
            orders.attach_payment_method("Cash"),
            Err(OrderError::NoCurrentBill)
        ));
    }

    #[test]
    fn payment_is_last_write_wins_and_persisted() {
        let (orders, cart, storage) = setup();
        cart.add_item(1).unwrap();
        let confirmed = orders.confirm_order().unwrap();

        orders.attach_payment_method("Cash").unwrap();
        let updated = orders.attach_payment_method("Card").unwrap();
        assert_eq!(updated.payment_method.as_deref(), Some("Card"));

        // Logged copy updated too; everything else untouched
        let logged = storage.get_order(confirmed.order_id).unwrap().unwrap();
        assert_eq!(logged.payment_method.as_deref(), Some("Card"));
        assert_eq!(logged.total, confirmed.total);
        assert_eq!(logged.items, confirmed.items);
        assert_eq!(logged.date, confirmed.date);
    }

    #[test]
    fn stage_follows_the_checkout_lifecycle() {
        let (orders, cart, _) = setup();
        assert_eq!(orders.stage(), CheckoutStage::Building);

        cart.add_item(2).unwrap();
        orders.confirm_order().unwrap();
        assert_eq!(orders.stage(), CheckoutStage::Confirmed);

        orders.attach_payment_method("UPI").unwrap();
        assert_eq!(orders.stage(), CheckoutStage::Settled);

        orders.start_new_order().unwrap();
        assert_eq!(orders.stage(), CheckoutStage::Building);
        assert!(cart.get().unwrap().is_empty());
    }

    #[test]
    fn confirmation_emits_an_event() {
        let (orders, cart, _) = setup();
        let mut rx = orders.subscribe();

        cart.add_item(1).unwrap();
        let order = orders.confirm_order().unwrap();

        match rx.try_recv().unwrap() {
            SalesEvent::OrderConfirmed { order_id } => assert_eq!(order_id, order.order_id),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn new_order_keeps_the_sales_log() {
        let (orders, cart, storage) = setup();
        cart.add_item(1).unwrap();
        orders.confirm_order().unwrap();
        orders.start_new_order().unwrap();

        assert_eq!(storage.all_orders().unwrap().len(), 1);
        assert!(orders.recall_current_bill().is_none());
    }
}
