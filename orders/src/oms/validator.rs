//! Order validation logic
//!
//! This module checks parsed orders and admin edits against the intake limits
//! before they reach the store.

use crate::config::IntakeConfig;
use crate::error::{OrderError, OrderResult};
use crate::intake::{NewOrder, OrderUpdate};
use crate::order::BuyerDetails;

/// Order validator
pub struct OrderValidator {
    limits: IntakeConfig,
}

impl OrderValidator {
    /// Create a new order validator with default limits
    pub fn new() -> Self {
        Self {
            limits: IntakeConfig::default(),
        }
    }

    /// Create a validator with custom limits
    pub fn custom(limits: IntakeConfig) -> Self {
        Self { limits }
    }

    /// Validate a new order
    pub fn validate(&self, order: &NewOrder) -> OrderResult<()> {
        self.check_buyer(&order.buyer)?;
        self.check_quantity(order.quantity)?;
        self.check_pickup_place(&order.pickup_place)?;
        self.check_special_request(&order.special_request)
    }

    /// Validate an admin edit
    ///
    /// Text fields are checked as they will be stored, i.e. trimmed.
    pub fn validate_update(&self, update: &OrderUpdate) -> OrderResult<()> {
        self.check_buyer(&update.buyer())?;
        self.check_quantity(update.quantity)?;
        self.check_pickup_place(update.pickup_place.trim())?;
        self.check_special_request(update.special_request.trim())
    }

    fn check_buyer(&self, buyer: &BuyerDetails) -> OrderResult<()> {
        required("Customer name", &buyer.name, self.limits.max_name_len)?;
        required("Contact number", &buyer.contact_number, self.limits.max_contact_len)?;
        required("Address", &buyer.address, self.limits.max_address_len)
    }

    fn check_quantity(&self, quantity: u32) -> OrderResult<()> {
        if quantity == 0 {
            return Err(OrderError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }

        if quantity > self.limits.max_quantity {
            return Err(OrderError::ValidationError(format!(
                "Quantity {} exceeds maximum {}",
                quantity, self.limits.max_quantity
            )));
        }

        Ok(())
    }

    fn check_pickup_place(&self, pickup_place: &str) -> OrderResult<()> {
        required("Pickup place", pickup_place, self.limits.max_pickup_place_len)
    }

    fn check_special_request(&self, special_request: &str) -> OrderResult<()> {
        max_len("Special request", special_request, self.limits.max_special_request_len)
    }
}

impl Default for OrderValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn required(field: &str, value: &str, max: usize) -> OrderResult<()> {
    if value.trim().is_empty() {
        return Err(OrderError::ValidationError(format!("{} cannot be empty", field)));
    }
    max_len(field, value, max)
}

fn max_len(field: &str, value: &str, max: usize) -> OrderResult<()> {
    let len = value.chars().count();
    if len > max {
        return Err(OrderError::ValidationError(format!(
            "{} is {} characters, maximum is {}",
            field, len, max
        )));
    }
    Ok(())
}
