//! Receipt extraction engine.
//!
//! Lockup receipts are read through an HTML tree; store receipts are read
//! with patterns over the raw markup because their nested tables are too
//! irregular for structural queries. Both paths feed the same normalizer.

pub mod normalize;
mod parser;
pub mod rules;

pub use normalize::{normalize, normalize_with, sum_prices};
pub use parser::{ParseOutcome, ReceiptParser};
pub use rules::{classify, decode, Extraction, ReceiptExtractor};
