//! Request and order records produced by completed workflows
//!
//! The same shape is posted to the webhook and kept in local storage, so the
//! serde names follow the spreadsheet columns: `type, requestId, product,
//! customerName, contactInfo, quantity, timestamp`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which entry point produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    /// Request for an item that is not listed in the catalog
    #[serde(rename = "New Item Request")]
    NewItemRequest,
    /// Order for a listed catalog item
    #[serde(rename = "Product Order")]
    ProductOrder,
}

impl RequestKind {
    /// Prefix of generated ids
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::NewItemRequest => "REQ",
            Self::ProductOrder => "ORD",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NewItemRequest => "New Item Request",
            Self::ProductOrder => "Product Order",
        }
    }

    /// Short noun used in user-facing messages
    pub fn noun(self) -> &'static str {
        match self {
            Self::NewItemRequest => "Request",
            Self::ProductOrder => "Order",
        }
    }
}

/// Field values that passed the non-empty check of every prompt.
///
/// Only the workflow state machine can build one, so a record can never be
/// assembled from partially collected input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDraft {
    kind: RequestKind,
    product: String,
    customer_name: String,
    contact_info: String,
    quantity: Option<String>,
}

impl RequestDraft {
    pub(in crate::state) fn new(
        kind: RequestKind,
        product: String,
        customer_name: String,
        contact_info: String,
        quantity: Option<String>,
    ) -> Self {
        Self {
            kind,
            product,
            customer_name,
            contact_info,
            quantity,
        }
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn product(&self) -> &str {
        &self.product
    }
}

/// A completed request or order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    #[serde(rename = "type")]
    pub kind: RequestKind,
    #[serde(rename = "requestId")]
    pub id: String,
    pub product: String,
    pub customer_name: String,
    pub contact_info: String,
    /// Absent for new-item requests; the receiving sheet defaults it to empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(rename = "timestamp", with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl RequestRecord {
    /// Build a record from a validated draft, stamping id and timestamp from `now`
    pub fn from_draft(draft: RequestDraft, now: DateTime<Utc>) -> Self {
        let millis = now.timestamp_millis();
        // Id and timestamp share the same millisecond
        let created_at = DateTime::from_timestamp_millis(millis).unwrap_or(now);

        Self {
            kind: draft.kind,
            id: format!("{}-{}", draft.kind.id_prefix(), millis),
            product: draft.product,
            customer_name: draft.customer_name,
            contact_info: draft.contact_info,
            quantity: draft.quantity,
            created_at,
        }
    }

    /// Quantity for display ("N/A" for new-item requests)
    pub fn quantity_label(&self) -> &str {
        self.quantity.as_deref().unwrap_or("N/A")
    }

    /// Title of the confirmation dialog
    pub fn confirmation_title(&self) -> String {
        format!(
            "✅ {} SUBMITTED SUCCESSFULLY!",
            self.kind.noun().to_uppercase()
        )
    }

    /// Body of the confirmation dialog
    pub fn confirmation_message(&self) -> String {
        let noun = self.kind.noun();
        let mut message = format!(
            "{noun} ID: {}\nProduct: {}\n",
            self.id, self.product
        );
        if let Some(quantity) = &self.quantity {
            message.push_str(&format!("Quantity: {quantity}\n"));
        }
        message.push_str(&format!(
            "Name: {}\n\nNEXT STEP:\nPress Enter to open the messaging link and contact us with your {noun} ID.",
            self.customer_name
        ));
        message
    }
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
