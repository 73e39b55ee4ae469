//! Order types and related data structures
//!
//! This module defines the order record shared by intake, the order store and
//! the ranking engine, together with the closed label sets (delicacy,
//! container, status) an order is built from.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::intake::NewOrder;

/// Unique identifier for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
    /// Generate a new random order ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = OrderError;

    fn from_str(s: &str) -> OrderResult<Self> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| OrderError::ValidationError(format!("Invalid order id '{}': {}", s, e)))
    }
}

/// Unique identifier for a buyer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuyerId(pub Uuid);

impl BuyerId {
    /// Generate a new random buyer ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BuyerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BuyerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical form of a submitted label: trimmed, uppercased, with hyphens
/// and inner spaces turned into underscores.
pub(crate) fn normalize_label(raw: &str) -> String {
    raw.trim()
        .to_uppercase()
        .chars()
        .map(|c| if c == '-' || c.is_whitespace() { '_' } else { c })
        .collect()
}

fn parse_label<T: Copy>(
    field: &'static str,
    raw: &str,
    variants: &[T],
    name: fn(&T) -> &'static str,
) -> OrderResult<T> {
    let normalized = normalize_label(raw);
    variants
        .iter()
        .copied()
        .find(|v| name(v) == normalized)
        .ok_or_else(|| OrderError::InvalidEnumValue {
            field,
            value: raw.to_string(),
        })
}

/// Delicacy kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Delicacy {
    Sinukmani,
    SapinSapin,
    Puto,
    PutoAlsa,
    Kutsinta,
    PutoKutsinta,
    Maja,
    PichiPichi,
    Palitaw,
    Karioka,
    SumanMalagkit,
    SumanCassava,
    SumanLihia,
}

impl Delicacy {
    /// Every delicacy kind, in menu order
    pub const ALL: [Delicacy; 13] = [
        Delicacy::Sinukmani,
        Delicacy::SapinSapin,
        Delicacy::Puto,
        Delicacy::PutoAlsa,
        Delicacy::Kutsinta,
        Delicacy::PutoKutsinta,
        Delicacy::Maja,
        Delicacy::PichiPichi,
        Delicacy::Palitaw,
        Delicacy::Karioka,
        Delicacy::SumanMalagkit,
        Delicacy::SumanCassava,
        Delicacy::SumanLihia,
    ];

    /// Canonical name, e.g. `SAPIN_SAPIN`
    pub fn name(&self) -> &'static str {
        match self {
            Delicacy::Sinukmani => "SINUKMANI",
            Delicacy::SapinSapin => "SAPIN_SAPIN",
            Delicacy::Puto => "PUTO",
            Delicacy::PutoAlsa => "PUTO_ALSA",
            Delicacy::Kutsinta => "KUTSINTA",
            Delicacy::PutoKutsinta => "PUTO_KUTSINTA",
            Delicacy::Maja => "MAJA",
            Delicacy::PichiPichi => "PICHI_PICHI",
            Delicacy::Palitaw => "PALITAW",
            Delicacy::Karioka => "KARIOKA",
            Delicacy::SumanMalagkit => "SUMAN_MALAGKIT",
            Delicacy::SumanCassava => "SUMAN_CASSAVA",
            Delicacy::SumanLihia => "SUMAN_LIHIA",
        }
    }

    /// Display label as shown on the order form
    pub fn label(&self) -> &'static str {
        match self {
            Delicacy::Sinukmani => "Sinukmani",
            Delicacy::SapinSapin => "Sapin-Sapin",
            Delicacy::Puto => "Puto",
            Delicacy::PutoAlsa => "Puto Alsa",
            Delicacy::Kutsinta => "Kutsinta",
            Delicacy::PutoKutsinta => "Puto Kutsinta",
            Delicacy::Maja => "Maja",
            Delicacy::PichiPichi => "Pichi-Pichi",
            Delicacy::Palitaw => "Palitaw",
            Delicacy::Karioka => "Karioka",
            Delicacy::SumanMalagkit => "Suman Malagkit",
            Delicacy::SumanCassava => "Suman Cassava",
            Delicacy::SumanLihia => "Suman Lihia",
        }
    }
}

impl std::fmt::Display for Delicacy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Delicacy {
    type Err = OrderError;

    fn from_str(s: &str) -> OrderResult<Self> {
        parse_label("delicacy", s, &Self::ALL, Self::name)
    }
}

/// Container the order is packed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerSize {
    #[serde(rename = "BILAO_10")]
    Bilao10,
    #[serde(rename = "BILAO_12")]
    Bilao12,
    #[serde(rename = "BILAO_14")]
    Bilao14,
    #[serde(rename = "BILAO_16")]
    Bilao16,
    #[serde(rename = "BILAO_18")]
    Bilao18,
    #[serde(rename = "TAB")]
    Tab,
    #[serde(rename = "SLICE")]
    Slice,
}

impl ContainerSize {
    /// Every container kind
    pub const ALL: [ContainerSize; 7] = [
        ContainerSize::Bilao10,
        ContainerSize::Bilao12,
        ContainerSize::Bilao14,
        ContainerSize::Bilao16,
        ContainerSize::Bilao18,
        ContainerSize::Tab,
        ContainerSize::Slice,
    ];

    /// Canonical name, e.g. `BILAO_10`
    pub fn name(&self) -> &'static str {
        match self {
            ContainerSize::Bilao10 => "BILAO_10",
            ContainerSize::Bilao12 => "BILAO_12",
            ContainerSize::Bilao14 => "BILAO_14",
            ContainerSize::Bilao16 => "BILAO_16",
            ContainerSize::Bilao18 => "BILAO_18",
            ContainerSize::Tab => "TAB",
            ContainerSize::Slice => "SLICE",
        }
    }
}

impl std::fmt::Display for ContainerSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ContainerSize {
    type Err = OrderError;

    fn from_str(s: &str) -> OrderResult<Self> {
        parse_label("container", s, &Self::ALL, Self::name)
    }
}

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order was submitted and not started yet
    Pending,
    /// Order is being prepared
    InProgress,
    /// Order is ready or handed over
    Completed,
    /// Order was soft-deleted; kept for history only
    Removed,
}

impl OrderStatus {
    /// Every status
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::InProgress,
        OrderStatus::Completed,
        OrderStatus::Removed,
    ];

    /// Canonical name, e.g. `IN_PROGRESS`
    pub fn name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Removed => "REMOVED",
        }
    }

    /// Display label, e.g. `In Progress`
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::InProgress => "In Progress",
            OrderStatus::Completed => "Completed",
            OrderStatus::Removed => "Removed",
        }
    }

    fn stage(&self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::InProgress => 1,
            OrderStatus::Completed => 2,
            OrderStatus::Removed => 3,
        }
    }

    /// Check whether the lifecycle allows moving from `self` to `next`.
    ///
    /// Progress only moves forward (staying put is allowed), any live status
    /// may be removed, and nothing leaves `Removed`.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match (self, next) {
            (OrderStatus::Removed, _) => false,
            (_, OrderStatus::Removed) => true,
            (current, next) => next.stage() >= current.stage(),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> OrderResult<Self> {
        parse_label("status", s, &Self::ALL, Self::name)
    }
}

/// Buyer contact details as submitted on the order form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerDetails {
    pub name: String,
    pub contact_number: String,
    pub address: String,
}

/// Stored buyer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerInfo {
    /// Unique buyer identifier
    pub id: BuyerId,
    pub name: String,
    pub contact_number: String,
    pub address: String,
}

impl BuyerInfo {
    /// Create a buyer record with a fresh ID
    pub fn new(details: BuyerDetails) -> Self {
        Self {
            id: BuyerId::new(),
            name: details.name,
            contact_number: details.contact_number,
            address: details.address,
        }
    }

    /// Check whether this record holds exactly the given details
    pub fn matches(&self, details: &BuyerDetails) -> bool {
        self.name == details.name
            && self.contact_number == details.contact_number
            && self.address == details.address
    }
}

/// Delicacy order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier
    pub id: OrderId,

    /// Buyer who placed the order
    pub buyer_id: BuyerId,

    /// Ordered delicacy
    pub delicacy: Delicacy,

    /// Number of containers
    pub quantity: u32,

    /// Container kind
    pub container: ContainerSize,

    /// Free-text request, may be empty
    #[serde(default)]
    pub special_request: String,

    /// Where the buyer picks the order up
    pub pickup_place: String,

    /// Day the buyer picks the order up
    pub pickup_date: NaiveDate,

    /// Current order status
    pub status: OrderStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a new pending order for an already resolved buyer
    pub fn new(buyer_id: BuyerId, request: NewOrder) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::new(),
            buyer_id,
            delicacy: request.delicacy,
            quantity: request.quantity,
            container: request.container,
            special_request: request.special_request,
            pickup_place: request.pickup_place,
            pickup_date: request.pickup_date,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if order was soft-deleted
    pub fn is_removed(&self) -> bool {
        self.status == OrderStatus::Removed
    }

    /// Check if order belongs to the management view
    pub fn is_active(&self) -> bool {
        !self.is_removed()
    }

    /// Update order status
    pub fn update_status(&mut self, status: OrderStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}
