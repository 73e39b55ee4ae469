//! Order intake
//!
//! Turns the raw order form into a typed [`NewOrder`]. Delicacy and container
//! labels go through the shared label normalizer (`" sapin-sapin "` becomes
//! `SAPIN_SAPIN`), the pickup date must be `YYYY-MM-DD`, and a missing
//! quantity falls back to the configured default.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{OrderError, OrderResult};
use crate::order::{BuyerDetails, BuyerInfo, ContainerSize, Delicacy, Order, OrderStatus};

/// Date format accepted for pickup dates
pub const PICKUP_DATE_FORMAT: &str = "%Y-%m-%d";

/// Order form exactly as submitted by a customer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderForm {
    pub customer_name: String,
    #[serde(rename = "contactNumber")]
    pub contact_number: String,
    pub address: String,
    #[serde(rename = "pickupPlace")]
    pub pickup_place: String,
    #[serde(rename = "pickupDate")]
    pub pickup_date: String,
    pub delicacy: String,
    #[serde(default)]
    pub quantity: Option<String>,
    pub container: String,
    #[serde(rename = "specialRequest", default)]
    pub special_request: String,
}

impl OrderForm {
    /// Parse the form into a typed order request
    pub fn parse(&self, default_quantity: u32) -> OrderResult<NewOrder> {
        Ok(NewOrder {
            buyer: BuyerDetails {
                name: self.customer_name.trim().to_string(),
                contact_number: self.contact_number.trim().to_string(),
                address: self.address.trim().to_string(),
            },
            delicacy: self.delicacy.parse()?,
            quantity: parse_quantity(self.quantity.as_deref(), default_quantity)?,
            container: self.container.parse()?,
            special_request: self.special_request.trim().to_string(),
            pickup_place: self.pickup_place.trim().to_string(),
            pickup_date: parse_pickup_date(&self.pickup_date)?,
        })
    }
}

/// Typed order request, ready for validation and storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub buyer: BuyerDetails,
    pub delicacy: Delicacy,
    pub quantity: u32,
    pub container: ContainerSize,
    #[serde(default)]
    pub special_request: String,
    pub pickup_place: String,
    pub pickup_date: NaiveDate,
}

/// Full replacement of an order's editable fields, as sent by the admin view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub customer_name: String,
    pub contact_number: String,
    pub address: String,
    pub pickup_place: String,
    pub pickup_date: NaiveDate,
    pub delicacy: Delicacy,
    pub quantity: u32,
    pub container: ContainerSize,
    #[serde(default)]
    pub special_request: String,
    pub status: OrderStatus,
}

impl OrderUpdate {
    /// Start an edit from the current state of an order
    pub fn from_order(order: &Order, buyer: &BuyerInfo) -> Self {
        Self {
            customer_name: buyer.name.clone(),
            contact_number: buyer.contact_number.clone(),
            address: buyer.address.clone(),
            pickup_place: order.pickup_place.clone(),
            pickup_date: order.pickup_date,
            delicacy: order.delicacy,
            quantity: order.quantity,
            container: order.container,
            special_request: order.special_request.clone(),
            status: order.status,
        }
    }

    /// Buyer details carried by the update
    pub fn buyer(&self) -> BuyerDetails {
        BuyerDetails {
            name: self.customer_name.trim().to_string(),
            contact_number: self.contact_number.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }
}

/// Parse a `YYYY-MM-DD` pickup date
pub fn parse_pickup_date(raw: &str) -> OrderResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), PICKUP_DATE_FORMAT).map_err(|source| {
        OrderError::InvalidDate {
            value: raw.to_string(),
            source,
        }
    })
}

/// Parse a quantity, using `default` when the field is missing or blank
pub fn parse_quantity(raw: Option<&str>, default: u32) -> OrderResult<u32> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(default),
        Some(raw) => raw,
    };

    let quantity: u32 = raw
        .parse()
        .map_err(|_| OrderError::InvalidQuantity(format!("'{}' is not a whole number", raw)))?;

    if quantity == 0 {
        return Err(OrderError::InvalidQuantity(
            "quantity must be at least 1".to_string(),
        ));
    }

    Ok(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_form() -> OrderForm {
        OrderForm {
            customer_name: " Aling Nena ".to_string(),
            contact_number: "09171234567".to_string(),
            address: "Malolos, Bulacan".to_string(),
            pickup_place: "Main store".to_string(),
            pickup_date: "2024-01-20".to_string(),
            delicacy: "sapin-sapin".to_string(),
            quantity: Some("3".to_string()),
            container: "bilao-12".to_string(),
            special_request: "Extra latik".to_string(),
        }
    }

    #[test]
    fn test_parse_valid_form() {
        let order = create_test_form().parse(1).unwrap();

        assert_eq!(order.buyer.name, "Aling Nena");
        assert_eq!(order.delicacy, Delicacy::SapinSapin);
        assert_eq!(order.container, ContainerSize::Bilao12);
        assert_eq!(order.quantity, 3);
        assert_eq!(order.pickup_date, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
        assert_eq!(order.special_request, "Extra latik");
    }

    #[test]
    fn test_missing_quantity_uses_default() {
        let mut form = create_test_form();
        form.quantity = None;
        assert_eq!(form.parse(1).unwrap().quantity, 1);

        form.quantity = Some("  ".to_string());
        assert_eq!(form.parse(4).unwrap().quantity, 4);
    }

    #[test]
    fn test_bad_quantity_rejected() {
        for raw in ["0", "-3", "abc", "2.5"] {
            let result = parse_quantity(Some(raw), 1);
            assert!(matches!(result, Err(OrderError::InvalidQuantity(_))), "{}", raw);
        }
    }

    #[test]
    fn test_unknown_delicacy_rejected() {
        let mut form = create_test_form();
        form.delicacy = "halo-halo".to_string();

        let result = form.parse(1);
        assert!(matches!(
            result,
            Err(OrderError::InvalidEnumValue { field: "delicacy", .. })
        ));
    }

    #[test]
    fn test_unknown_container_rejected() {
        let mut form = create_test_form();
        form.container = "basket".to_string();

        let result = form.parse(1);
        assert!(matches!(
            result,
            Err(OrderError::InvalidEnumValue { field: "container", .. })
        ));
    }

    #[test]
    fn test_bad_pickup_date_rejected() {
        for raw in ["01/20/2024", "2024-02-30", ""] {
            assert!(matches!(
                parse_pickup_date(raw),
                Err(OrderError::InvalidDate { .. })
            ));
        }
    }

    #[test]
    fn test_form_deserializes_from_form_field_names() {
        let json = r#"{
            "customer_name": "Mang Tonyo",
            "contactNumber": "0918",
            "address": "Hagonoy",
            "pickupPlace": "Market",
            "pickupDate": "2024-03-01",
            "delicacy": "PUTO",
            "container": "TAB"
        }"#;

        let form: OrderForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.quantity, None);
        assert_eq!(form.special_request, "");

        let order = form.parse(1).unwrap();
        assert_eq!(order.delicacy, Delicacy::Puto);
        assert_eq!(order.container, ContainerSize::Tab);
    }

    #[test]
    fn test_update_deserializes_canonical_names() {
        let json = r#"{
            "customer_name": "Mang Tonyo",
            "contact_number": "0918",
            "address": "Hagonoy",
            "pickup_place": "Market",
            "pickup_date": "2024-03-01",
            "delicacy": "SUMAN_CASSAVA",
            "quantity": 5,
            "container": "BILAO_16",
            "special_request": "",
            "status": "IN_PROGRESS"
        }"#;

        let update: OrderUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(update.delicacy, Delicacy::SumanCassava);
        assert_eq!(update.container, ContainerSize::Bilao16);
        assert_eq!(update.status, OrderStatus::InProgress);
        assert_eq!(update.buyer().name, "Mang Tonyo");
    }
}
