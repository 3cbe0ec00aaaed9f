//! Extraction for table-row store receipts (mobile platform vendor).
//!
//! Label/value pairs sit in nested tables whose depth varies from row to
//! row, so fields are located by pattern over the raw markup instead of a
//! tree walk. Every row follows "label cell, spacer cell, value cell".

use regex::Regex;
use tracing::debug;

use crate::models::receipt::ExtractedItem;

use super::amounts::normalize_currency_glyph;
use super::patterns::{
    SAMSUNG_APP_NAME, SAMSUNG_ORDER_NUMBER, SAMSUNG_ORDER_SHAPE, SAMSUNG_PRODUCT_NAME,
    SAMSUNG_TOTAL,
};
use super::{strip_markup, Extraction, ReceiptExtractor};

/// Store receipt extractor.
pub struct SamsungExtractor {
    default_app_name: String,
}

impl SamsungExtractor {
    pub fn new(default_app_name: impl Into<String>) -> Self {
        Self {
            default_app_name: default_app_name.into(),
        }
    }
}

impl Default for SamsungExtractor {
    fn default() -> Self {
        Self::new("Samsung 앱")
    }
}

impl ReceiptExtractor for SamsungExtractor {
    fn extract(&self, html: &str) -> Extraction {
        let app_name = labeled_value(&SAMSUNG_APP_NAME, html);
        let product_name = labeled_value(&SAMSUNG_PRODUCT_NAME, html);
        let order_id = extract_order_number(html).unwrap_or_default();
        let total = normalize_currency_glyph(&labeled_value(&SAMSUNG_TOTAL, html));

        debug!(
            "Store receipt: app {:?}, order id {:?}, total {:?}",
            app_name, order_id, total
        );

        // One purchase per mail; nothing at all when both key fields are missing.
        let items = if app_name.is_empty() && total.is_empty() {
            Vec::new()
        } else {
            vec![ExtractedItem {
                app_name: if app_name.is_empty() {
                    self.default_app_name.clone()
                } else {
                    app_name
                },
                product_name,
                price: total,
            }]
        };

        Extraction { order_id, items }
    }
}

/// Value cell text for a label row, markup stripped; empty if the row is absent.
fn labeled_value(pattern: &Regex, html: &str) -> String {
    pattern
        .captures(html)
        .map(|caps| strip_markup(&caps[1]))
        .unwrap_or_default()
}

/// Order number, accepted only in the vendor's `P` + digits shape.
pub fn extract_order_number(html: &str) -> Option<String> {
    let candidate = labeled_value(&SAMSUNG_ORDER_NUMBER, html);
    if SAMSUNG_ORDER_SHAPE.is_match(&candidate) {
        Some(candidate)
    } else {
        if !candidate.is_empty() {
            debug!("Discarding malformed order number {:?}", candidate);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(label: &str, value: &str) -> String {
        format!(
            r#"<tr><td style="color:#555">- {label}</td><td width="10">&nbsp;</td><td><span>{value}</span></td></tr>"#
        )
    }

    fn receipt(rows: &[(&str, &str)]) -> String {
        let body: String = rows.iter().map(|(l, v)| row(l, v)).collect();
        format!("<table><tr><td><table>{body}</table></td></tr></table>")
    }

    #[test]
    fn test_full_receipt() {
        let html = receipt(&[
            ("주문 번호", "P20250101123456ABC"),
            ("애플리케이션 이름", "Fit App"),
            ("상품 이름", "연간 멤버십"),
            ("합계", "￦3,300"),
        ]);

        let extraction = SamsungExtractor::default().extract(&html);
        assert_eq!(extraction.order_id, "P20250101123456ABC");
        assert_eq!(
            extraction.items,
            vec![ExtractedItem::new("Fit App", "연간 멤버십", "₩3,300")]
        );
    }

    #[test]
    fn test_malformed_order_number_is_discarded() {
        let html = receipt(&[("주문 번호", "ORD-12345"), ("합계", "￦1,000")]);
        let extraction = SamsungExtractor::default().extract(&html);
        assert_eq!(extraction.order_id, "");
        assert_eq!(extraction.items.len(), 1);
    }

    #[test]
    fn test_lowercase_order_prefix_is_discarded() {
        assert_eq!(extract_order_number(&receipt(&[("주문 번호", "p2025010112345")])), None);
    }

    #[test]
    fn test_missing_app_name_uses_default() {
        let html = receipt(&[("합계", "￦5,500")]);
        let items = SamsungExtractor::default().extract(&html).items;
        assert_eq!(items, vec![ExtractedItem::new("Samsung 앱", "", "₩5,500")]);
    }

    #[test]
    fn test_no_app_name_and_no_total_yields_no_items() {
        let html = receipt(&[("상품 이름", "광고 제거"), ("주문 번호", "P202501011234")]);
        let extraction = SamsungExtractor::default().extract(&html);
        assert!(extraction.items.is_empty());
        assert_eq!(extraction.order_id, "P202501011234");
    }
}
