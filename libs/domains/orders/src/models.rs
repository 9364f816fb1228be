use serde::{Deserialize, Serialize};
use serde_json::Number;
use utoipa::ToSchema;

/// Currency every order amount is tagged with
pub const CURRENCY: &str = "ZMW";

pub const SUCCESS_MESSAGE: &str = "Emails sent successfully";
pub const FAILURE_MESSAGE: &str = "Failed to send emails";

/// Recipient category of a rendered order email
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum EmailKind {
    /// Alert to the business owners; fatal on failure
    Admin,
    /// Receipt to the purchasing customer; fatal on failure
    Customer,
    /// Per-vendor fulfilment notice; failures are logged only
    Vendor,
}

impl EmailKind {
    /// Metric and log label
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Body of `POST /api/create-order`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    pub order: Order,
    pub customer: Customer,
    /// Vendors to notify individually; absent and `null` both mean none
    #[serde(default)]
    pub vendor_notifications: Option<Vec<VendorNotification>>,
}

impl OrderSubmission {
    pub fn vendors(&self) -> &[VendorNotification] {
        self.vendor_notifications.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Payment transaction reference
    pub transaction_ref: String,
    pub items: Vec<LineItem>,
    pub delivery_method: String,
    /// Order total in ZMW, rendered exactly as submitted
    #[schema(value_type = f64)]
    pub total: Number,
    pub id: String,
}

impl Order {
    /// Items whose vendor name is exactly `vendor_name`
    pub fn items_for_vendor<'a>(&'a self, vendor_name: &'a str) -> impl Iterator<Item = &'a LineItem> {
        self.items
            .iter()
            .filter(move |item| item.vendor.name == vendor_name)
    }

    /// Last six characters of the order id, or the whole id if shorter
    pub fn short_id(&self) -> &str {
        let count = self.id.chars().count();
        match self.id.char_indices().nth(count.saturating_sub(6)) {
            Some((start, _)) => &self.id[start..],
            None => &self.id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LineItem {
    pub quantity: u32,
    pub name: String,
    /// Unit price in ZMW
    #[schema(value_type = f64)]
    pub price: Number,
    pub vendor: VendorRef,
}

/// Owning vendor of a line item; only the name is used
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VendorRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct VendorNotification {
    pub name: String,
    pub email: String,
}

/// Response body for order submissions
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct OrderResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OrderResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: Some(SUCCESS_MESSAGE.to_string()),
            error: None,
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            message: None,
            error: Some(FAILURE_MESSAGE.to_string()),
        }
    }
}
