//! Order ranking
//!
//! This module decides the display order of the management listing under one
//! of three sort modes.

pub mod mode;
pub mod rank;
pub mod sort;

pub use mode::{ModeValidator, SortMode};
pub use rank::{delicacy_counts, rank_orders, rank_orders_on, Rankable};
pub use sort::{sort_by_derived_key, SortDirection};
