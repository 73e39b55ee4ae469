//! Sort mode selection and validation

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{OrderError, OrderResult};

/// Ranking mode for the order management listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Due or overdue orders first, then upcoming ones, each by date
    #[default]
    PickupDate,
    /// Most frequently ordered delicacies first
    Delicacy,
    /// Grouped by status name
    Status,
}

impl SortMode {
    /// Every recognized mode
    pub const ALL: [SortMode; 3] = [SortMode::PickupDate, SortMode::Delicacy, SortMode::Status];

    /// Request value for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::PickupDate => "pickup_date",
            SortMode::Delicacy => "delicacy",
            SortMode::Status => "status",
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = OrderError;

    /// Exact match against the request values; no case folding or trimming.
    fn from_str(s: &str) -> OrderResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| OrderError::InvalidMode(s.to_string()))
    }
}

/// Mode validator
///
/// Guards the ranking engine: a listing request either names one of the
/// recognized modes, names none (and gets the default), or is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeValidator {
    default_mode: SortMode,
}

impl ModeValidator {
    /// Create a validator that falls back to `default_mode`
    pub fn new(default_mode: SortMode) -> Self {
        Self { default_mode }
    }

    /// Validate a requested mode
    pub fn validate(&self, requested: Option<&str>) -> OrderResult<SortMode> {
        match requested {
            None => Ok(self.default_mode),
            Some(raw) => raw.parse().map_err(|e| {
                warn!("Rejected sort mode {:?}", raw);
                e
            }),
        }
    }
}
