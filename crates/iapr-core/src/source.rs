//! Inbound receipt records and the candidate filter applied before parsing.

use chrono::{DateTime, Months, Utc};
use mailparse::MailHeaderMap;
use serde::{Deserialize, Serialize};

use crate::error::{IaprError, Result};
use crate::models::receipt::{Brand, RawReceiptEmail};
use crate::receipt::rules::patterns::APPLE_RECEIPT_HINT;

/// Store a receipt mail came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourcePlatform {
    Apple,
    Samsung,
}

impl SourcePlatform {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Apple => "Apple",
            Self::Samsung => "Samsung",
        }
    }

    /// Sender address receipts from this store use.
    pub fn sender_address(&self) -> &'static str {
        match self {
            Self::Apple => "no_reply@email.apple.com",
            Self::Samsung => "applicationstore@samsung.com",
        }
    }

    /// Platform whose sender address appears in `from`.
    pub fn from_sender(from: &str) -> Option<Self> {
        let from = from.to_lowercase();
        [Self::Apple, Self::Samsung]
            .into_iter()
            .find(|platform| from.contains(platform.sender_address()))
    }

    /// Platform matching a detected receipt brand.
    pub fn from_brand(brand: Brand) -> Option<Self> {
        match brand {
            Brand::AppleStyle => Some(Self::Apple),
            Brand::SamsungStyle => Some(Self::Samsung),
            Brand::Unknown => None,
        }
    }

    /// Whether a mail from this store looks like a purchase receipt.
    pub fn accepts(&self, subject: &str, body: &str) -> bool {
        match self {
            Self::Apple => APPLE_RECEIPT_HINT.is_match(subject) || APPLE_RECEIPT_HINT.is_match(body),
            Self::Samsung => subject.contains("구매 영수증") || subject.contains("Purchase Receipt"),
        }
    }
}

impl std::fmt::Display for SourcePlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One candidate receipt mail handed over by the retrieval layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundRecord {
    /// Mailbox-unique message identifier.
    pub uid: String,
    pub subject: String,
    pub received_at: DateTime<Utc>,
    /// Raw message body, possibly transport-encoded.
    pub body: String,
    /// Originating store, when known.
    pub platform: Option<SourcePlatform>,
    /// Sender mailbox address.
    #[serde(default)]
    pub mailbox: String,
}

impl InboundRecord {
    /// Build a record from a raw RFC 822 message.
    ///
    /// Subject, date and sender come from the headers; the full message
    /// source is kept as the body so transport decoding happens in the engine.
    pub fn from_message(uid: impl Into<String>, raw: &[u8]) -> Result<Self> {
        let parsed = mailparse::parse_mail(raw)?;
        let headers = parsed.get_headers();

        let subject = headers.get_first_value("Subject").unwrap_or_default();
        let mailbox = headers.get_first_value("From").unwrap_or_default();
        let date = headers
            .get_first_value("Date")
            .ok_or_else(|| IaprError::Record("missing Date header".to_string()))?;
        let timestamp = mailparse::dateparse(&date)?;
        let received_at = DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| IaprError::Record(format!("date out of range: {date}")))?;

        Ok(Self {
            uid: uid.into(),
            subject,
            received_at,
            body: String::from_utf8_lossy(raw).into_owned(),
            platform: SourcePlatform::from_sender(&mailbox),
            mailbox,
        })
    }

    /// Whether the record passes its platform's receipt filter. Records
    /// without a known platform are kept.
    pub fn is_receipt_candidate(&self) -> bool {
        self.platform
            .map(|platform| platform.accepts(&self.subject, &self.body))
            .unwrap_or(true)
    }

    /// The engine's view of this record.
    pub fn to_email(&self) -> RawReceiptEmail {
        RawReceiptEmail::new(self.body.clone(), self.mailbox.clone(), self.received_at)
    }
}

/// Start of the default sync window: `months` calendar months before `now`.
pub fn since(months: u32, now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(months)).unwrap_or(now)
}
