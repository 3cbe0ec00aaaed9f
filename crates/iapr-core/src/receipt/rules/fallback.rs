//! Last-resort extraction: the largest won amount in the body.
//!
//! Receipts list unit prices and subtotals before the total, so the largest
//! amount is usually the total. This is a heuristic and is only used when no
//! structured extraction produced an item.

use tracing::debug;

use crate::models::receipt::ExtractedItem;

use super::amounts::find_won_tokens;
use super::{Extraction, ReceiptExtractor};

/// Currency-scan extractor.
pub struct FallbackExtractor {
    unknown_app_name: String,
}

impl FallbackExtractor {
    pub fn new(unknown_app_name: impl Into<String>) -> Self {
        Self {
            unknown_app_name: unknown_app_name.into(),
        }
    }
}

impl Default for FallbackExtractor {
    fn default() -> Self {
        Self::new("알 수 없음")
    }
}

impl ReceiptExtractor for FallbackExtractor {
    fn extract(&self, html: &str) -> Extraction {
        let tokens = find_won_tokens(html);

        // Earliest token wins ties.
        let largest = tokens.into_iter().max_by(|a, b| {
            a.value
                .cmp(&b.value)
                .then_with(|| b.position.cmp(&a.position))
        });

        let items = match largest {
            Some(token) => {
                debug!("Currency scan picked {}", token.source);
                vec![ExtractedItem::new(
                    self.unknown_app_name.clone(),
                    "",
                    token.source,
                )]
            }
            None => Vec::new(),
        };

        Extraction {
            order_id: String::new(),
            items,
        }
    }
}
