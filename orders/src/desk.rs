//! Order desk coordinating intake, storage and ranking
//!
//! The OrderDesk is the entry point for the request-handling layer. It parses
//! and validates submitted forms, hands them to the order store, and serves
//! the ranked management listing and the unranked history.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::config::OrdersConfig;
use crate::error::OrderResult;
use crate::intake::{OrderForm, OrderUpdate};
use crate::oms::store::{InMemoryOrderStore, OrderStore};
use crate::oms::validator::OrderValidator;
use crate::order::{BuyerId, BuyerInfo, Order, OrderId, OrderStatus};
use crate::ranking::{rank_orders_on, ModeValidator};

/// Order desk over an order store
pub struct OrderDesk {
    /// Order store
    store: Arc<dyn OrderStore>,

    /// Intake validator
    validator: OrderValidator,

    /// Sort mode validator
    mode_validator: ModeValidator,

    /// Configuration
    config: OrdersConfig,
}

impl OrderDesk {
    /// Create an order desk backed by an empty in-memory store
    pub fn new(config: OrdersConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryOrderStore::new()))
    }

    /// Create an order desk over an existing store
    pub fn with_store(config: OrdersConfig, store: Arc<dyn OrderStore>) -> Self {
        Self {
            store,
            validator: OrderValidator::custom(config.intake.clone()),
            mode_validator: ModeValidator::new(config.ranking.default_mode),
            config,
        }
    }

    /// Parse, validate and store a submitted order form
    pub fn submit_order(&self, form: &OrderForm) -> OrderResult<Order> {
        debug!("Received order form from {:?}", form.customer_name);

        let request = form.parse(self.config.intake.default_quantity).map_err(|e| {
            warn!("Rejected order form: {}", e);
            e
        })?;

        if self.config.desk.enable_validation {
            self.validator.validate(&request).map_err(|e| {
                warn!("Order failed validation: {}", e);
                e
            })?;
        }

        let order = self.store.insert_order(request)?;
        info!("Order submitted successfully: {}", order.id);
        Ok(order)
    }

    /// Ranked management listing of every non-removed order
    ///
    /// `sort_by` is validated before the store is read; an unknown mode is
    /// rejected without ranking anything.
    pub fn list_orders(&self, sort_by: Option<&str>) -> OrderResult<Vec<Order>> {
        self.list_orders_on(sort_by, Local::now().date_naive())
    }

    /// Ranked management listing with an explicit current date
    pub fn list_orders_on(&self, sort_by: Option<&str>, today: NaiveDate) -> OrderResult<Vec<Order>> {
        let mode = self.mode_validator.validate(sort_by)?;

        let candidates = self.store.fetch_active_orders()?;
        Ok(rank_orders_on(candidates, mode, today))
    }

    /// Every order, Removed included, in store order
    pub fn order_history(&self) -> OrderResult<Vec<Order>> {
        let orders = self.store.fetch_all_orders()?;
        info!("Orders fetched for history: {} orders found", orders.len());

        for order in &orders {
            debug!("Order ID: {}, Status: {}", order.id, order.status);
        }

        Ok(orders)
    }

    /// Get order by ID
    pub fn get_order(&self, order_id: &OrderId) -> OrderResult<Order> {
        self.store.get_order(order_id)
    }

    /// Get buyer by ID
    pub fn get_buyer(&self, buyer_id: &BuyerId) -> OrderResult<BuyerInfo> {
        self.store.get_buyer(buyer_id)
    }

    /// Replace the editable fields of an order
    pub fn update_order(&self, order_id: &OrderId, update: &OrderUpdate) -> OrderResult<Order> {
        info!("Updating order: {}", order_id);

        if self.config.desk.enable_validation {
            self.validator.validate_update(update)?;
        }

        self.store.update_order(order_id, update)
    }

    /// Move an order through its lifecycle
    pub fn set_status(&self, order_id: &OrderId, status: OrderStatus) -> OrderResult<Order> {
        self.store.set_status(order_id, status)
    }

    /// Soft delete: hide the order from the listing, keep it in history
    pub fn remove_order(&self, order_id: &OrderId) -> OrderResult<Order> {
        info!("Removing order: {}", order_id);
        self.store.mark_removed(order_id)
    }

    /// Hard delete: drop the order from the store for good
    pub fn delete_order(&self, order_id: &OrderId) -> OrderResult<Order> {
        info!("Deleting order: {}", order_id);
        self.store.delete_order(order_id)
    }

    /// Get configuration
    pub fn config(&self) -> &OrdersConfig {
        &self.config
    }

    /// Get order store (for advanced usage)
    pub fn store(&self) -> &Arc<dyn OrderStore> {
        &self.store
    }
}
