//! Receipt data models: the raw mail handed to the engine and what it extracts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A purchase-confirmation email body as delivered by the retrieval layer.
///
/// The body may still be transport-encoded. The engine reads it and never
/// mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReceiptEmail {
    /// Email body, possibly quoted-printable encoded.
    pub body: String,

    /// Mailbox address the message was fetched from.
    pub mailbox: String,

    /// When the message was received.
    pub received_at: DateTime<Utc>,
}

impl RawReceiptEmail {
    pub fn new(body: impl Into<String>, mailbox: impl Into<String>, received_at: DateTime<Utc>) -> Self {
        Self {
            body: body.into(),
            mailbox: mailbox.into(),
            received_at,
        }
    }
}

/// A single purchased line item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedItem {
    /// Application name, or the configured unknown-name sentinel.
    pub app_name: String,

    /// Product or SKU name; empty when the receipt does not name one.
    pub product_name: String,

    /// Currency-formatted price as printed on the receipt (e.g. `₩1,200`).
    pub price: String,
}

impl ExtractedItem {
    pub fn new(
        app_name: impl Into<String>,
        product_name: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            product_name: product_name.into(),
            price: price.into(),
        }
    }
}

/// Final output of one engine invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Order identifier, empty if none was recognized.
    pub order_id: String,

    /// Formatted sum of all item prices; empty when the sum is not positive.
    pub total_price: String,

    /// Items in document order.
    pub items: Vec<ExtractedItem>,
}

impl ParseResult {
    /// True when nothing at all was recognized.
    pub fn is_empty(&self) -> bool {
        self.order_id.is_empty() && self.items.is_empty()
    }
}

/// Vendor template family that decides the extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Brand {
    /// Device maker receipts (nested lockup tables, `주문 ID:` label).
    AppleStyle,
    /// Mobile platform store receipts (label/value table rows).
    SamsungStyle,
    /// No vendor signature found.
    Unknown,
}

impl Brand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AppleStyle => "apple_style",
            Self::SamsungStyle => "samsung_style",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Brand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
