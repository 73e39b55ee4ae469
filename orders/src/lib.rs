//! # bilao-orders: Order Intake and Management for a Delicacy Seller
//!
//! This library takes customer orders for kakanin (rice cakes and other
//! native delicacies), keeps them in an order store, and ranks the outstanding
//! ones for the seller's management view.
//!
//! ## Core Components
//!
//! - **OrderDesk**: Entry point tying intake, storage and ranking together
//! - **Intake**: Order form parsing (delicacy / container labels, pickup dates)
//! - **Order Management System (OMS)**: Order store and intake validation
//! - **Ranking**: Display order under the `pickup_date`, `delicacy` and
//!   `status` sort modes
//!
//! ## Example Usage
//!
//! ```rust
//! use bilao_orders::{OrderDesk, OrderForm, OrdersConfig};
//!
//! let desk = OrderDesk::new(OrdersConfig::default());
//!
//! let form = OrderForm {
//!     customer_name: "Aling Nena".to_string(),
//!     contact_number: "09171234567".to_string(),
//!     address: "Malolos, Bulacan".to_string(),
//!     pickup_place: "Main store".to_string(),
//!     pickup_date: "2024-01-20".to_string(),
//!     delicacy: "sapin-sapin".to_string(),
//!     quantity: Some("2".to_string()),
//!     container: "bilao-12".to_string(),
//!     special_request: String::new(),
//! };
//!
//! desk.submit_order(&form).unwrap();
//!
//! let listing = desk.list_orders(Some("delicacy")).unwrap();
//! assert_eq!(listing.len(), 1);
//!
//! assert!(desk.list_orders(Some("bogus")).is_err());
//! ```

// Public modules
pub mod config;
pub mod desk;
pub mod error;
pub mod intake;
pub mod oms;
pub mod order;
pub mod ranking;

// Re-export main types
pub use config::{DeskConfig, IntakeConfig, OrdersConfig, RankingConfig};
pub use desk::OrderDesk;
pub use error::{OrderError, OrderResult};
pub use intake::{NewOrder, OrderForm, OrderUpdate};
pub use oms::{InMemoryOrderStore, OrderStore, OrderValidator, StoreSnapshot};
pub use order::{
    BuyerDetails, BuyerId, BuyerInfo, ContainerSize, Delicacy, Order, OrderId, OrderStatus,
};
pub use ranking::{rank_orders, rank_orders_on, ModeValidator, Rankable, SortMode};

/// Initialize tracing
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bilao_orders=info"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init();
}
