//! Order ranking engine
//!
//! Produces the display order of the management listing. The engine is a pure
//! function of its input snapshot and the current date: it never mutates an
//! order, performs no I/O and holds no locks.

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::error::OrderResult;
use crate::order::{Delicacy, Order, OrderStatus};

use super::mode::SortMode;
use super::sort::{sort_by_derived_key, SortDirection};

/// Fields the ranking engine reads from a record
pub trait Rankable {
    /// Day the order is picked up
    fn pickup_date(&self) -> NaiveDate;

    /// Ordered delicacy
    fn delicacy(&self) -> Delicacy;

    /// Current lifecycle status
    fn status(&self) -> OrderStatus;
}

impl Rankable for Order {
    fn pickup_date(&self) -> NaiveDate {
        self.pickup_date
    }

    fn delicacy(&self) -> Delicacy {
        self.delicacy
    }

    fn status(&self) -> OrderStatus {
        self.status
    }
}

impl<T: Rankable + ?Sized> Rankable for &T {
    fn pickup_date(&self) -> NaiveDate {
        (**self).pickup_date()
    }

    fn delicacy(&self) -> Delicacy {
        (**self).delicacy()
    }

    fn status(&self) -> OrderStatus {
        (**self).status()
    }
}

/// Rank candidates under a requested mode, relative to today's local date.
///
/// The mode is validated before anything else; an unrecognized mode returns
/// [`OrderError::InvalidMode`](crate::OrderError::InvalidMode) and the
/// candidates are dropped unranked.
pub fn rank_orders<T: Rankable>(candidates: Vec<T>, mode: &str) -> OrderResult<Vec<T>> {
    let mode: SortMode = mode.parse()?;
    Ok(rank_orders_on(candidates, mode, Local::now().date_naive()))
}

/// Rank candidates under `mode`, treating `today` as the current date
pub fn rank_orders_on<T: Rankable>(candidates: Vec<T>, mode: SortMode, today: NaiveDate) -> Vec<T> {
    debug!("Ranking {} orders by {} (today {})", candidates.len(), mode, today);

    match mode {
        SortMode::PickupDate => rank_by_pickup_date(candidates, today),
        SortMode::Delicacy => rank_by_delicacy(candidates),
        SortMode::Status => rank_by_status(candidates),
    }
}

/// Count orders per delicacy kind
pub fn delicacy_counts<T: Rankable>(candidates: &[T]) -> HashMap<Delicacy, usize> {
    let mut counts = HashMap::new();
    for order in candidates {
        *counts.entry(order.delicacy()).or_insert(0) += 1;
    }
    counts
}

/// Due-or-past orders (pickup on or before today) first, then future orders,
/// each bucket in ascending pickup date.
fn rank_by_pickup_date<T: Rankable>(candidates: Vec<T>, today: NaiveDate) -> Vec<T> {
    let (mut due_or_past, mut future): (Vec<T>, Vec<T>) = candidates
        .into_iter()
        .partition(|order| order.pickup_date() <= today);

    sort_by_derived_key(&mut due_or_past, |o| o.pickup_date(), SortDirection::Ascending);
    sort_by_derived_key(&mut future, |o| o.pickup_date(), SortDirection::Ascending);

    debug!(
        "Pickup buckets: {} due or past, {} upcoming",
        due_or_past.len(),
        future.len()
    );

    due_or_past.extend(future);
    due_or_past
}

/// Orders keyed by how many candidates share their delicacy, most common first
fn rank_by_delicacy<T: Rankable>(mut candidates: Vec<T>) -> Vec<T> {
    let counts = delicacy_counts(&candidates);

    sort_by_derived_key(
        &mut candidates,
        |o| counts.get(&o.delicacy()).copied().unwrap_or(0),
        SortDirection::Descending,
    );
    candidates
}

/// Orders by the lexicographic status name (`COMPLETED` < `IN_PROGRESS` <
/// `PENDING` < `REMOVED`), not by lifecycle position.
fn rank_by_status<T: Rankable>(mut candidates: Vec<T>) -> Vec<T> {
    sort_by_derived_key(&mut candidates, |o| o.status().name(), SortDirection::Ascending);
    candidates
}
