//! Core library for in-app purchase receipt processing.
//!
//! This crate provides:
//! - Quoted-printable transport decoding of receipt mail bodies
//! - Brand detection and per-vendor line item extraction
//! - A currency-scan fallback for unrecognized receipts
//! - Aggregation rows, offline categories and monthly summaries

pub mod aggregate;
pub mod category;
pub mod error;
pub mod models;
pub mod receipt;
pub mod source;

pub use aggregate::{monthly_summary, process_batch, rows_for, MonthlySummary, ReceiptRow};
pub use category::{Category, CategoryResolver, KeywordResolver};
pub use error::{IaprError, Result};
pub use models::config::IaprConfig;
pub use models::receipt::{Brand, ExtractedItem, ParseResult, RawReceiptEmail};
pub use receipt::{ParseOutcome, ReceiptParser};
pub use source::{InboundRecord, SourcePlatform};

/// Parse one raw receipt body with default settings.
pub fn parse_receipt(raw: &str) -> ParseResult {
    ReceiptParser::new().parse(raw)
}
