use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stored shape of a payment document in a client's `payments`
/// subcollection. A payment is created by the booking flow and only ever
/// mutated here by validation toggling, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub value: Decimal,
    /// Confirmed by staff; distinct from the payment existing
    #[serde(default)]
    pub validation: bool,
    /// Links the payment documents of one logical transaction, e.g. a
    /// split payment across the travelers of one booking
    pub group_id: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_url: Option<String>,
    pub date: DateTime<Utc>,
}

impl PaymentRecord {
    /// Key identifying the logical transaction this document belongs to.
    /// The value is normalized so 40 and 40.0 compare equal.
    pub fn transaction_key(&self) -> (String, Decimal) {
        (self.group_id.clone(), self.value.normalize())
    }
}

/// One row of the pending-payments listing, denormalized for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingPayment {
    pub payment_id: String,
    pub client_id: String,
    pub client_name: String,
    pub passport_number: String,
    /// Referrer display name; "Unknown" when the email does not resolve
    pub referrer: String,
    pub group_id: String,
    pub value: Decimal,
    pub method: String,
    pub proof_url: Option<String>,
    pub date: DateTime<Utc>,
}
