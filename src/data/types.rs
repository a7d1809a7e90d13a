//! Customer and order records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Backend record ID
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    /// Business-facing customer ID
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub customer_id: String,

    /// Full name
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub name: String,

    /// Email address
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Lifetime spend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_spend: Option<f64>,

    /// Number of visits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visits: Option<u64>,

    /// Timestamp of the last visit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visit: Option<String>,

    /// Free-form attributes such as `loyalty_tier`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_attributes: Option<Map<String, Value>>,
}

impl Customer {
    /// The `loyalty_tier` custom attribute, when it is a string
    pub fn loyalty_tier(&self) -> Option<&str> {
        self.custom_attributes
            .as_ref()
            .and_then(|attrs| attrs.get("loyalty_tier"))
            .and_then(Value::as_str)
    }
}

/// An order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Backend record ID
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    /// Business-facing order ID
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub order_id: String,

    /// `customer_id` of the customer who placed the order
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub customer_id_external: String,

    /// Order date, usually ISO 8601
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub date: String,

    /// Order total
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_fields_do_not_poison_the_list() {
        let customers: Vec<Customer> = serde_json::from_value(json!([
            { "_id": "1", "customer_id": "C1", "name": "A", "email": "a@x.com" },
            { "_id": "2", "customer_id": "C2", "name": "B", "email": null, "phone": null, "visits": null }
        ]))
        .unwrap();

        assert_eq!(customers.len(), 2);
        assert_eq!(customers[1].email, "");
        assert_eq!(customers[1].phone, None);
        assert_eq!(customers[1].visits, None);
    }

    #[test]
    fn null_order_amount_is_zero() {
        let order: Order = serde_json::from_value(json!({
            "_id": "o1",
            "order_id": "ORD-1",
            "customer_id_external": null,
            "date": "2025-05-01",
            "amount": null
        }))
        .unwrap();

        assert_eq!(order.amount, 0.0);
        assert_eq!(order.customer_id_external, "");
    }
}
