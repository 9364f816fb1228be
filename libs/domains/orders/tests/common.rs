#![allow(dead_code)]

use domain_orders::{NotifierConfig, OrderSubmission};
use serde_json::{Value, json};

pub const SENDER: &str = "orders@foodcollective.zm";
pub const OWNER: &str = "owner@foodcollective.zm";

pub fn config() -> NotifierConfig {
    NotifierConfig::new(SENDER, vec![OWNER.to_string()])
}

/// The single-vendor order from the storefront checkout
pub fn burger_order() -> Value {
    json!({
        "order": {
            "transactionRef": "MM-7781",
            "items": [
                { "quantity": 2, "name": "Burger", "price": 50, "vendor": { "name": "Joe's" } }
            ],
            "deliveryMethod": "Delivery",
            "total": 100,
            "id": "ord_5f2c9a81b7e4"
        },
        "customer": { "name": "Ama", "email": "ama@x.com", "phone": "0977123456" },
        "vendorNotifications": [ { "name": "Joe's", "email": "joe@x.com" } ]
    })
}

/// An order spread over three vendors
pub fn market_order() -> Value {
    json!({
        "order": {
            "transactionRef": "MM-9002",
            "items": [
                { "quantity": 1, "name": "Burger", "price": 50, "vendor": { "name": "Joe's" } },
                { "quantity": 3, "name": "Samosa", "price": 7.5, "vendor": { "name": "Mama Kitchen" } },
                { "quantity": 2, "name": "Mango Juice", "price": 15, "vendor": { "name": "Fresh Press" } }
            ],
            "deliveryMethod": "Pickup",
            "total": 102.5,
            "id": "ord_77aa01c3d9f0"
        },
        "customer": { "name": "Chanda", "email": "chanda@x.com", "phone": "0966000111" },
        "vendorNotifications": [
            { "name": "Joe's", "email": "joe@x.com" },
            { "name": "Mama Kitchen", "email": "mama@x.com" },
            { "name": "Fresh Press", "email": "press@x.com" }
        ]
    })
}

pub fn submission(value: Value) -> OrderSubmission {
    serde_json::from_value(value).unwrap()
}
