//! Rule-based extractors for vendor receipt templates.

pub mod amounts;
pub mod apple;
pub mod brand;
pub mod fallback;
pub mod patterns;
pub mod samsung;
pub mod transport;

pub use amounts::{format_price, normalize_currency_glyph, parse_price, price_value};
pub use apple::AppleExtractor;
pub use brand::classify;
pub use fallback::FallbackExtractor;
pub use samsung::SamsungExtractor;
pub use transport::decode;

use crate::models::receipt::ExtractedItem;
use patterns::MARKUP_TAG;

/// What one extraction strategy recovered from a decoded body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Order identifier, empty if not found.
    pub order_id: String,
    /// Items in document order.
    pub items: Vec<ExtractedItem>,
}

/// Trait for brand-specific receipt extractors.
///
/// Extractors never fail: a missing block or label yields an empty field or
/// no items, and the caller decides whether to escalate.
pub trait ReceiptExtractor {
    /// Extract the order identifier and items from decoded markup.
    fn extract(&self, html: &str) -> Extraction;
}

/// A matched value together with the text it came from.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Remove markup tags and surrounding whitespace.
pub fn strip_markup(s: &str) -> String {
    MARKUP_TAG.replace_all(s, "").trim().to_string()
}
