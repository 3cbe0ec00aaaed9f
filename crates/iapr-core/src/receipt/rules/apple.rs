//! Extraction for lockup-style receipts (device maker).
//!
//! These receipts repeat one `subscription-lockup` table per purchased item.
//! The markup generator appends hashed suffixes to class names and has
//! changed them between template versions, so blocks and fields are matched
//! by an exact class token or a stable class fragment.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::models::receipt::ExtractedItem;

use super::patterns::{APPLE_ORDER_ID_MARKUP, APPLE_ORDER_ID_SHAPE};
use super::{strip_markup, Extraction, ReceiptExtractor};

/// Localized "Order ID:" label.
pub const ORDER_ID_LABEL: &str = "주문 ID:";

/// Matches an element by exact class token or by a substring of its class
/// attribute.
#[derive(Debug, Clone, Copy)]
pub struct ClassMatch {
    tag: &'static str,
    exact: &'static str,
    fragment: &'static str,
}

impl ClassMatch {
    pub const fn new(tag: &'static str, exact: &'static str, fragment: &'static str) -> Self {
        Self { tag, exact, fragment }
    }

    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        let value = element.value();
        if value.name() != self.tag {
            return false;
        }
        let Some(class) = value.attr("class") else {
            return false;
        };
        class.split_whitespace().any(|token| token == self.exact) || class.contains(self.fragment)
    }

    /// First descendant of `root` (document order) this matcher accepts.
    fn first_in<'a>(&self, root: ElementRef<'a>) -> Option<ElementRef<'a>> {
        let selector = Selector::parse(self.tag).ok()?;
        root.select(&selector).find(|el| self.matches(el))
    }
}

pub const LOCKUP_BLOCK: ClassMatch =
    ClassMatch::new("table", "subscription-lockup__container", "subscription-lockup");
pub const APP_NAME_FIELD: ClassMatch = ClassMatch::new("p", "custom-gzadzy", "gzadzy");
pub const PRODUCT_NAME_FIELD: ClassMatch = ClassMatch::new("p", "custom-wogfc8", "wogfc8");
pub const PRICE_FIELD: ClassMatch = ClassMatch::new("p", "custom-137u684", "137u684");

/// Lockup receipt extractor.
pub struct AppleExtractor {
    unknown_app_name: String,
}

impl AppleExtractor {
    pub fn new(unknown_app_name: impl Into<String>) -> Self {
        Self {
            unknown_app_name: unknown_app_name.into(),
        }
    }

    /// Every lockup block turned into an item; blocks with neither an app
    /// name nor a price are skipped.
    pub fn extract_items(&self, document: &Html) -> Vec<ExtractedItem> {
        let Ok(tables) = Selector::parse("table") else {
            return Vec::new();
        };

        document
            .select(&tables)
            .filter(|table| LOCKUP_BLOCK.matches(table))
            .filter_map(|block| self.item_from_block(block))
            .collect()
    }

    fn item_from_block(&self, block: ElementRef<'_>) -> Option<ExtractedItem> {
        let app_name = field_text(block, &APP_NAME_FIELD);
        let product_name = field_text(block, &PRODUCT_NAME_FIELD);
        let price = strip_markup(&field_text(block, &PRICE_FIELD));

        if app_name.is_empty() && price.is_empty() {
            return None;
        }

        let app_name = if app_name.is_empty() {
            self.unknown_app_name.clone()
        } else {
            app_name
        };

        Some(ExtractedItem {
            app_name,
            product_name,
            price,
        })
    }
}

impl Default for AppleExtractor {
    fn default() -> Self {
        Self::new("알 수 없음")
    }
}

impl ReceiptExtractor for AppleExtractor {
    fn extract(&self, html: &str) -> Extraction {
        let document = Html::parse_document(html);

        let order_id = order_id_from_tree(&document)
            .or_else(|| order_id_from_markup(html))
            .unwrap_or_default();
        let items = self.extract_items(&document);

        debug!(
            "Lockup receipt: order id {:?}, {} item(s)",
            order_id,
            items.len()
        );

        Extraction { order_id, items }
    }
}

/// Trimmed text of the first matching field inside `block`, empty if absent.
fn field_text(block: ElementRef<'_>, field: &ClassMatch) -> String {
    field
        .first_in(block)
        .map(|el| element_text(&el))
        .unwrap_or_default()
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Stage one: a `<p>` carrying the label, followed directly by a `<p>`
/// sibling whose text has the order ID shape. The last valid pair in
/// document order wins.
pub fn order_id_from_tree(document: &Html) -> Option<String> {
    let paragraphs = Selector::parse("p").ok()?;

    document
        .select(&paragraphs)
        .filter(|p| element_text(p).contains(ORDER_ID_LABEL))
        .filter_map(|label| {
            let next = label.next_siblings().find_map(ElementRef::wrap)?;
            if next.value().name() != "p" {
                return None;
            }
            let candidate = element_text(&next);
            APPLE_ORDER_ID_SHAPE
                .is_match(&candidate)
                .then_some(candidate)
        })
        .last()
}

/// Stage two: the label followed by the identifier directly in markup,
/// with any number of tags in between.
pub fn order_id_from_markup(html: &str) -> Option<String> {
    APPLE_ORDER_ID_MARKUP
        .captures(html)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lockup(app: &str, product: &str, price: &str) -> String {
        format!(
            r#"<table class="subscription-lockup__container"><tr><td>
                <p class="custom-gzadzy">{app}</p>
                <p class="custom-wogfc8">{product}</p>
                <p class="custom-137u684">{price}</p>
            </td></tr></table>"#
        )
    }

    #[test]
    fn test_order_id_from_sibling() {
        let html = r#"<div><p>주문 ID:</p><p> ABC123XYZ </p></div>"#;
        let document = Html::parse_document(html);
        assert_eq!(order_id_from_tree(&document), Some("ABC123XYZ".to_string()));
    }

    #[test]
    fn test_last_valid_order_id_pair_wins() {
        let html = r#"<p>주문 ID:</p><p>FIRST111</p><p>주문 ID:</p><p>SECOND22</p><p>주문 ID:</p><p>x</p>"#;
        let document = Html::parse_document(html);
        assert_eq!(order_id_from_tree(&document), Some("SECOND22".to_string()));
    }

    #[test]
    fn test_order_id_sibling_must_be_paragraph() {
        let html = r#"<div><p>주문 ID:</p><span>ABC123XYZ</span></div>"#;
        let document = Html::parse_document(html);
        assert_eq!(order_id_from_tree(&document), None);
        // The markup scan still finds it.
        assert_eq!(order_id_from_markup(html), Some("ABC123XYZ".to_string()));
    }

    #[test]
    fn test_order_id_too_short_is_rejected() {
        let html = r#"<div><p>주문 ID:</p><p>ab</p></div>"#;
        let extraction = AppleExtractor::default().extract(html);
        assert_eq!(extraction.order_id, "");
    }

    #[test]
    fn test_tree_stage_wins_over_markup_stage() {
        // The markup scan would pick up "FIRSTID1" from the inline label.
        let html = r#"<p>주문 ID: FIRSTID1</p><p>SECOND22</p>"#;
        let extraction = AppleExtractor::default().extract(html);
        assert_eq!(extraction.order_id, "SECOND22");
    }

    #[test]
    fn test_multiple_lockups() {
        let html = format!(
            "<html><body>{}{}</body></html>",
            lockup("Game Plus", "월간 구독권", "₩1,200"),
            lockup("Music Pro", "프리미엄 구독", "₩9,900")
        );

        let items = AppleExtractor::default().extract(&html).items;
        assert_eq!(
            items,
            vec![
                ExtractedItem::new("Game Plus", "월간 구독권", "₩1,200"),
                ExtractedItem::new("Music Pro", "프리미엄 구독", "₩9,900"),
            ]
        );
    }

    #[test]
    fn test_class_fragment_matching() {
        let html = r#"<table class="subscription-lockup-v2 wide"><tr><td>
            <p class="custom-gzadzy-x1">Photo Editor</p>
            <p class="foo custom-137u684v9">₩4,400</p>
        </td></tr></table>"#;

        let items = AppleExtractor::default().extract(html).items;
        assert_eq!(items, vec![ExtractedItem::new("Photo Editor", "", "₩4,400")]);
    }

    #[test]
    fn test_missing_app_name_uses_sentinel() {
        let html = lockup("", "보석 500개", "₩2,200");
        let items = AppleExtractor::new("unknown").extract(&html).items;
        assert_eq!(items, vec![ExtractedItem::new("unknown", "보석 500개", "₩2,200")]);
    }

    #[test]
    fn test_block_without_name_or_price_is_skipped() {
        let html = lockup("", "스타터 팩", "");
        assert!(AppleExtractor::default().extract(&html).items.is_empty());
    }

    #[test]
    fn test_price_markup_fragments_are_stripped() {
        let html = lockup("Game Plus", "", "₩1,200&lt;br/&gt;");
        let items = AppleExtractor::default().extract(&html).items;
        assert_eq!(items[0].price, "₩1,200");
    }
}
