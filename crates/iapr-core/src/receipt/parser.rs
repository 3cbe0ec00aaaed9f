//! Receipt parser: decode, classify, extract, normalize.

use std::time::Instant;

use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::receipt::{Brand, ParseResult, RawReceiptEmail};

use super::normalize::normalize_with;
use super::rules::{
    classify, decode, AppleExtractor, Extraction, FallbackExtractor, ReceiptExtractor,
    SamsungExtractor,
};

/// Parse result with the path the engine took to produce it.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Final result.
    pub result: ParseResult,
    /// Brand selected for the body.
    pub brand: Brand,
    /// Whether the currency scan produced the items.
    pub used_fallback: bool,
    /// Processing time in microseconds.
    pub processing_time_us: u64,
}

/// Receipt parsing engine.
///
/// Holds only configuration, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct ReceiptParser {
    /// App name for items whose name was not found.
    unknown_app_name: String,
    /// App name for store receipts missing the application row.
    samsung_default_app_name: String,
    /// Currency symbol for the formatted total.
    currency_symbol: String,
    /// Escalate empty lockup receipts to the currency scan.
    fallback_on_empty_apple: bool,
}

impl ReceiptParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a parser from the extraction section of the config.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            unknown_app_name: config.unknown_app_name.clone(),
            samsung_default_app_name: config.samsung_default_app_name.clone(),
            currency_symbol: config.currency_symbol.clone(),
            fallback_on_empty_apple: config.fallback_on_empty_apple,
        }
    }

    /// Set the unknown app name sentinel.
    pub fn with_unknown_app_name(mut self, name: impl Into<String>) -> Self {
        self.unknown_app_name = name.into();
        self
    }

    /// Set the default app name for store receipts.
    pub fn with_samsung_default_app_name(mut self, name: impl Into<String>) -> Self {
        self.samsung_default_app_name = name.into();
        self
    }

    /// Set the currency symbol used for totals.
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Set whether empty lockup receipts fall back to the currency scan.
    pub fn with_apple_fallback(mut self, enabled: bool) -> Self {
        self.fallback_on_empty_apple = enabled;
        self
    }

    /// Parse a raw, possibly transport-encoded body.
    pub fn parse(&self, raw: &str) -> ParseResult {
        self.parse_detailed(raw).result
    }

    /// Parse the body of a received email.
    pub fn parse_email(&self, email: &RawReceiptEmail) -> ParseResult {
        self.parse(&email.body)
    }

    /// Parse and report which brand and strategy were used.
    pub fn parse_detailed(&self, raw: &str) -> ParseOutcome {
        let start = Instant::now();

        let decoded = decode(raw);
        let brand = classify(&decoded);
        debug!("Classified {} byte body as {}", decoded.len(), brand);

        let (extraction, used_fallback) = self.extract(brand, &decoded);
        let result = normalize_with(extraction.order_id, extraction.items, &self.currency_symbol);

        if result.is_empty() {
            debug!("Nothing recognized in {} receipt", brand);
        }

        ParseOutcome {
            result,
            brand,
            used_fallback,
            processing_time_us: start.elapsed().as_micros() as u64,
        }
    }

    /// Run the strategy for `brand`, escalating to the currency scan where
    /// allowed. Returns the extraction and whether the scan supplied the items.
    fn extract(&self, brand: Brand, decoded: &str) -> (Extraction, bool) {
        match brand {
            Brand::AppleStyle => {
                let extraction = AppleExtractor::new(self.unknown_app_name.as_str()).extract(decoded);
                if !extraction.items.is_empty() || !self.fallback_on_empty_apple {
                    return (extraction, false);
                }

                debug!("No lockup blocks found, falling back to currency scan");
                let scanned = self.fallback().extract(decoded);
                let used_fallback = !scanned.items.is_empty();
                (
                    Extraction {
                        order_id: extraction.order_id,
                        items: scanned.items,
                    },
                    used_fallback,
                )
            }
            Brand::SamsungStyle => (
                SamsungExtractor::new(self.samsung_default_app_name.as_str()).extract(decoded),
                false,
            ),
            Brand::Unknown => {
                let scanned = self.fallback().extract(decoded);
                let used_fallback = !scanned.items.is_empty();
                (scanned, used_fallback)
            }
        }
    }

    fn fallback(&self) -> FallbackExtractor {
        FallbackExtractor::new(self.unknown_app_name.as_str())
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}
