//! Order Management System (OMS)
//!
//! This module provides order storage and intake validation.

pub mod store;
pub mod validator;

pub use store::{InMemoryOrderStore, OrderStore, StoreSnapshot};
pub use validator::OrderValidator;
