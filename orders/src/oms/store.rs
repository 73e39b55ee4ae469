//! Order Management System - Order store
//!
//! This module provides the order store the desk reads candidate sets from and
//! applies edits to. Orders and buyers are kept in insertion order so history
//! comes back in submission order.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{OrderError, OrderResult};
use crate::intake::{NewOrder, OrderUpdate};
use crate::order::{BuyerDetails, BuyerId, BuyerInfo, Order, OrderId, OrderStatus};

/// Storage collaborator of the order desk
pub trait OrderStore: Send + Sync {
    /// Get a buyer by ID
    fn get_buyer(&self, buyer_id: &BuyerId) -> OrderResult<BuyerInfo>;

    /// Store a new pending order
    ///
    /// The buyer is matched on exact (name, contact number, address); a
    /// matching record is reused, otherwise a new one is created.
    fn insert_order(&self, request: NewOrder) -> OrderResult<Order>;

    /// Get an order by ID
    fn get_order(&self, order_id: &OrderId) -> OrderResult<Order>;

    /// All orders whose status is not Removed
    fn fetch_active_orders(&self) -> OrderResult<Vec<Order>>;

    /// All orders, Removed included
    fn fetch_all_orders(&self) -> OrderResult<Vec<Order>>;

    /// Replace the editable fields of an order
    fn update_order(&self, order_id: &OrderId, update: &OrderUpdate) -> OrderResult<Order>;

    /// Move an order through its lifecycle
    fn set_status(&self, order_id: &OrderId, status: OrderStatus) -> OrderResult<Order>;

    /// Soft delete: mark the order Removed and keep it for history
    fn mark_removed(&self, order_id: &OrderId) -> OrderResult<Order> {
        self.set_status(order_id, OrderStatus::Removed)
    }

    /// Hard delete: drop the order record entirely
    fn delete_order(&self, order_id: &OrderId) -> OrderResult<Order>;

    /// Number of stored orders, Removed included
    fn count(&self) -> OrderResult<usize>;
}

/// Serializable copy of a store's contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub buyers: Vec<BuyerInfo>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl StoreSnapshot {
    /// Parse a snapshot from JSON
    pub fn from_json(json: &str) -> OrderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the snapshot as pretty JSON
    pub fn to_json(&self) -> OrderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn read<T>(lock: &RwLock<T>) -> OrderResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| OrderError::InternalError(format!("Failed to acquire read lock: {}", e)))
}

fn write<T>(lock: &RwLock<T>) -> OrderResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| OrderError::InternalError(format!("Failed to acquire write lock: {}", e)))
}

/// Return the buyer with exactly these details, creating it if needed
fn buyer_for(buyers: &mut IndexMap<BuyerId, BuyerInfo>, details: BuyerDetails) -> BuyerInfo {
    if let Some(existing) = buyers.values().find(|b| b.matches(&details)) {
        return existing.clone();
    }

    let buyer = BuyerInfo::new(details);
    info!("Creating new buyer: {} ({})", buyer.name, buyer.id);
    buyers.insert(buyer.id, buyer.clone());
    buyer
}

/// In-memory order store
///
/// Lock order is buyers before orders wherever both are held.
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<IndexMap<OrderId, Order>>>,
    buyers: Arc<RwLock<IndexMap<BuyerId, BuyerInfo>>>,
}

impl InMemoryOrderStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(IndexMap::new())),
            buyers: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Rebuild a store from a snapshot
    ///
    /// Every order must reference a buyer present in the snapshot.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> OrderResult<Self> {
        let buyers: IndexMap<BuyerId, BuyerInfo> =
            snapshot.buyers.into_iter().map(|b| (b.id, b)).collect();

        let mut orders = IndexMap::with_capacity(snapshot.orders.len());
        for order in snapshot.orders {
            if !buyers.contains_key(&order.buyer_id) {
                return Err(OrderError::BuyerNotFound(order.buyer_id));
            }
            orders.insert(order.id, order);
        }

        info!("Loaded {} orders and {} buyers", orders.len(), buyers.len());

        Ok(Self {
            orders: Arc::new(RwLock::new(orders)),
            buyers: Arc::new(RwLock::new(buyers)),
        })
    }

    /// Copy the store's contents
    pub fn snapshot(&self) -> OrderResult<StoreSnapshot> {
        let buyers = read(&self.buyers)?;
        let orders = read(&self.orders)?;

        Ok(StoreSnapshot {
            buyers: buyers.values().cloned().collect(),
            orders: orders.values().cloned().collect(),
        })
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn get_buyer(&self, buyer_id: &BuyerId) -> OrderResult<BuyerInfo> {
        let buyers = read(&self.buyers)?;

        buyers
            .get(buyer_id)
            .cloned()
            .ok_or_else(|| OrderError::BuyerNotFound(*buyer_id))
    }

    fn insert_order(&self, request: NewOrder) -> OrderResult<Order> {
        let mut buyers = write(&self.buyers)?;
        let mut orders = write(&self.orders)?;

        let buyer = buyer_for(&mut buyers, request.buyer.clone());
        let order = Order::new(buyer.id, request);

        info!(
            "Stored order {} for buyer {}: {} x{} pickup {}",
            order.id, buyer.id, order.delicacy, order.quantity, order.pickup_date
        );

        orders.insert(order.id, order.clone());
        Ok(order)
    }

    fn get_order(&self, order_id: &OrderId) -> OrderResult<Order> {
        let orders = read(&self.orders)?;

        orders
            .get(order_id)
            .cloned()
            .ok_or_else(|| OrderError::OrderNotFound(*order_id))
    }

    fn fetch_active_orders(&self) -> OrderResult<Vec<Order>> {
        let orders = read(&self.orders)?;

        let active: Vec<Order> = orders.values().filter(|o| o.is_active()).cloned().collect();
        debug!("Fetched {} active of {} orders", active.len(), orders.len());
        Ok(active)
    }

    fn fetch_all_orders(&self) -> OrderResult<Vec<Order>> {
        let orders = read(&self.orders)?;

        Ok(orders.values().cloned().collect())
    }

    fn update_order(&self, order_id: &OrderId, update: &OrderUpdate) -> OrderResult<Order> {
        let mut buyers = write(&self.buyers)?;
        let mut orders = write(&self.orders)?;

        let order = orders
            .get_mut(order_id)
            .ok_or_else(|| OrderError::OrderNotFound(*order_id))?;

        if order.is_removed() {
            return Err(OrderError::InvalidOrderState {
                order_id: *order_id,
                current_state: order.status.to_string(),
                operation: "update".to_string(),
            });
        }

        if update.status != order.status && !order.status.can_transition_to(update.status) {
            return Err(OrderError::InvalidOrderState {
                order_id: *order_id,
                current_state: order.status.to_string(),
                operation: format!("update to {}", update.status),
            });
        }

        let buyer = buyer_for(&mut buyers, update.buyer());

        order.buyer_id = buyer.id;
        order.pickup_place = update.pickup_place.trim().to_string();
        order.pickup_date = update.pickup_date;
        order.delicacy = update.delicacy;
        order.quantity = update.quantity;
        order.container = update.container;
        order.special_request = update.special_request.trim().to_string();
        order.status = update.status;
        order.updated_at = Utc::now();

        info!("Updated order {}", order_id);
        Ok(order.clone())
    }

    fn set_status(&self, order_id: &OrderId, status: OrderStatus) -> OrderResult<Order> {
        let mut orders = write(&self.orders)?;

        let order = orders
            .get_mut(order_id)
            .ok_or_else(|| OrderError::OrderNotFound(*order_id))?;

        if order.status == status {
            return Ok(order.clone());
        }

        if !order.status.can_transition_to(status) {
            return Err(OrderError::InvalidOrderState {
                order_id: *order_id,
                current_state: order.status.to_string(),
                operation: format!("set status {}", status),
            });
        }

        info!("Order {}: {} -> {}", order_id, order.status, status);
        order.update_status(status);
        Ok(order.clone())
    }

    fn delete_order(&self, order_id: &OrderId) -> OrderResult<Order> {
        let mut orders = write(&self.orders)?;

        let order = orders
            .shift_remove(order_id)
            .ok_or_else(|| OrderError::OrderNotFound(*order_id))?;

        info!("Permanently deleted order {}", order_id);
        Ok(order)
    }

    fn count(&self) -> OrderResult<usize> {
        let orders = read(&self.orders)?;

        Ok(orders.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{ContainerSize, Delicacy};
    use chrono::NaiveDate;

    fn buyer_details(name: &str) -> BuyerDetails {
        BuyerDetails {
            name: name.to_string(),
            contact_number: "09171234567".to_string(),
            address: "Malolos, Bulacan".to_string(),
        }
    }

    fn create_test_request(name: &str, delicacy: Delicacy) -> NewOrder {
        NewOrder {
            buyer: buyer_details(name),
            delicacy,
            quantity: 1,
            container: ContainerSize::Bilao10,
            special_request: String::new(),
            pickup_place: "Main store".to_string(),
            pickup_date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
        }
    }

    #[test]
    fn test_insert_and_retrieve_order() {
        let store = InMemoryOrderStore::new();
        let order = store
            .insert_order(create_test_request("Aling Nena", Delicacy::Puto))
            .unwrap();

        let retrieved = store.get_order(&order.id).unwrap();
        assert_eq!(retrieved.id, order.id);
        assert_eq!(retrieved.status, OrderStatus::Pending);

        let buyer = store.get_buyer(&retrieved.buyer_id).unwrap();
        assert_eq!(buyer.name, "Aling Nena");
    }

    #[test]
    fn test_buyer_reused_for_identical_details() {
        let store = InMemoryOrderStore::new();
        let first = store
            .insert_order(create_test_request("Aling Nena", Delicacy::Puto))
            .unwrap();
        let second = store
            .insert_order(create_test_request("Aling Nena", Delicacy::Maja))
            .unwrap();
        let third = store
            .insert_order(create_test_request("Mang Tonyo", Delicacy::Maja))
            .unwrap();

        assert_eq!(first.buyer_id, second.buyer_id);
        assert_ne!(first.buyer_id, third.buyer_id);
        assert_eq!(store.snapshot().unwrap().buyers.len(), 2);
    }

    #[test]
    fn test_active_orders_exclude_removed() {
        let store = InMemoryOrderStore::new();
        let kept = store
            .insert_order(create_test_request("A", Delicacy::Puto))
            .unwrap();
        let removed = store
            .insert_order(create_test_request("B", Delicacy::Puto))
            .unwrap();

        store.mark_removed(&removed.id).unwrap();

        let active = store.fetch_active_orders().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, kept.id);

        let all = store.fetch_all_orders().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].status, OrderStatus::Removed);
    }

    #[test]
    fn test_fetch_all_keeps_insertion_order() {
        let store = InMemoryOrderStore::new();
        let ids: Vec<OrderId> = (0..5)
            .map(|i| {
                store
                    .insert_order(create_test_request(&format!("buyer-{}", i), Delicacy::Puto))
                    .unwrap()
                    .id
            })
            .collect();

        let fetched: Vec<OrderId> = store.fetch_all_orders().unwrap().iter().map(|o| o.id).collect();
        assert_eq!(fetched, ids);
    }

    #[test]
    fn test_status_lifecycle() {
        let store = InMemoryOrderStore::new();
        let order = store
            .insert_order(create_test_request("A", Delicacy::Puto))
            .unwrap();

        store.set_status(&order.id, OrderStatus::InProgress).unwrap();
        store.set_status(&order.id, OrderStatus::Completed).unwrap();

        let result = store.set_status(&order.id, OrderStatus::Pending);
        assert!(matches!(result, Err(OrderError::InvalidOrderState { .. })));

        store.mark_removed(&order.id).unwrap();
        let result = store.set_status(&order.id, OrderStatus::Completed);
        assert!(matches!(result, Err(OrderError::InvalidOrderState { .. })));
    }

    #[test]
    fn test_mark_removed_is_idempotent() {
        let store = InMemoryOrderStore::new();
        let order = store
            .insert_order(create_test_request("A", Delicacy::Puto))
            .unwrap();

        store.mark_removed(&order.id).unwrap();
        let again = store.mark_removed(&order.id).unwrap();
        assert_eq!(again.status, OrderStatus::Removed);
    }

    #[test]
    fn test_update_order() {
        let store = InMemoryOrderStore::new();
        let order = store
            .insert_order(create_test_request("A", Delicacy::Puto))
            .unwrap();
        let buyer = store.get_buyer(&order.buyer_id).unwrap();

        let mut update = OrderUpdate::from_order(&order, &buyer);
        update.delicacy = Delicacy::Karioka;
        update.quantity = 4;
        update.status = OrderStatus::InProgress;
        update.address = "Hagonoy, Bulacan".to_string();

        let updated = store.update_order(&order.id, &update).unwrap();
        assert_eq!(updated.delicacy, Delicacy::Karioka);
        assert_eq!(updated.quantity, 4);
        assert_eq!(updated.status, OrderStatus::InProgress);
        assert_ne!(updated.buyer_id, order.buyer_id);

        // The original buyer record is left untouched
        let original_buyer = store.get_buyer(&order.buyer_id).unwrap();
        assert_eq!(original_buyer.address, "Malolos, Bulacan");
    }

    #[test]
    fn test_update_rejects_backwards_status() {
        let store = InMemoryOrderStore::new();
        let order = store
            .insert_order(create_test_request("A", Delicacy::Puto))
            .unwrap();
        store.set_status(&order.id, OrderStatus::Completed).unwrap();

        let buyer = store.get_buyer(&order.buyer_id).unwrap();
        let mut update = OrderUpdate::from_order(&store.get_order(&order.id).unwrap(), &buyer);
        update.status = OrderStatus::Pending;

        let result = store.update_order(&order.id, &update);
        assert!(matches!(result, Err(OrderError::InvalidOrderState { .. })));
    }

    #[test]
    fn test_update_removed_order_rejected() {
        let store = InMemoryOrderStore::new();
        let order = store
            .insert_order(create_test_request("A", Delicacy::Puto))
            .unwrap();
        let buyer = store.get_buyer(&order.buyer_id).unwrap();
        store.mark_removed(&order.id).unwrap();

        let update = OrderUpdate::from_order(&order, &buyer);
        let result = store.update_order(&order.id, &update);
        assert!(matches!(result, Err(OrderError::InvalidOrderState { .. })));
    }

    #[test]
    fn test_delete_order() {
        let store = InMemoryOrderStore::new();
        let order = store
            .insert_order(create_test_request("A", Delicacy::Puto))
            .unwrap();
        store.mark_removed(&order.id).unwrap();

        let deleted = store.delete_order(&order.id).unwrap();
        assert_eq!(deleted.id, order.id);
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.get_order(&order.id).unwrap_err().is_not_found());
        assert!(store.delete_order(&order.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let store = InMemoryOrderStore::new();
        store
            .insert_order(create_test_request("A", Delicacy::Puto))
            .unwrap();
        store
            .insert_order(create_test_request("B", Delicacy::Maja))
            .unwrap();

        let json = store.snapshot().unwrap().to_json().unwrap();
        let restored = InMemoryOrderStore::from_snapshot(StoreSnapshot::from_json(&json).unwrap()).unwrap();

        assert_eq!(restored.snapshot().unwrap(), store.snapshot().unwrap());
    }

    #[test]
    fn test_snapshot_with_unknown_buyer_rejected() {
        let store = InMemoryOrderStore::new();
        store
            .insert_order(create_test_request("A", Delicacy::Puto))
            .unwrap();

        let mut snapshot = store.snapshot().unwrap();
        snapshot.buyers.clear();

        let result = InMemoryOrderStore::from_snapshot(snapshot);
        assert!(matches!(result, Err(OrderError::BuyerNotFound(_))));
    }
}
