//! Common regex patterns for receipt extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Builds the store-receipt row pattern: the label cell closes, a spacer cell
/// follows, and the next cell holds the value.
fn labeled_cell(label: &str) -> Regex {
    Regex::new(&format!(
        r"(?i){}</td>[\s\S]*?<td[^>]*>[\s\S]*?<td[^>]*>([\s\S]*?)</td>",
        regex::escape(label)
    ))
    .unwrap()
}

lazy_static! {
    // Quoted-printable escapes (`=3D`) and soft line breaks
    pub static ref QP_ESCAPE: Regex = Regex::new(r"=(?:[0-9A-Fa-f]{2}|\r?\n)").unwrap();

    // Any markup tag
    pub static ref MARKUP_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();

    // Lockup receipt order ID
    pub static ref APPLE_ORDER_ID_SHAPE: Regex = Regex::new(r"^[A-Za-z0-9]{6,15}$").unwrap();

    pub static ref APPLE_ORDER_ID_MARKUP: Regex = Regex::new(
        r"(?i)주문\s*ID\s*:?\s*(?:<[^>]*>\s*)*([A-Z0-9]{6,15})(?:[^A-Z0-9]|$)"
    ).unwrap();

    // Store receipt label rows
    pub static ref SAMSUNG_APP_NAME: Regex = labeled_cell("애플리케이션 이름");
    pub static ref SAMSUNG_PRODUCT_NAME: Regex = labeled_cell("상품 이름");
    pub static ref SAMSUNG_ORDER_NUMBER: Regex = labeled_cell("주문 번호");
    pub static ref SAMSUNG_TOTAL: Regex = labeled_cell("합계");

    // Store receipt order number (P + 10-20 digits + optional suffix)
    pub static ref SAMSUNG_ORDER_SHAPE: Regex = Regex::new(r"^P\d{10,20}[A-Z0-9]*$").unwrap();

    // Won amounts: standard or full-width sign directly followed by digits
    pub static ref WON_TOKEN: Regex = Regex::new(r"[₩￦](\d[\d,]*)").unwrap();

    // Leading numeric value of a price after sign and grouping are removed
    pub static ref PRICE_NUMBER: Regex = Regex::new(r"^[-+]?\d+(?:\.\d+)?").unwrap();

    // Receipt-looking subject or body for the device maker's mailbox
    pub static ref APPLE_RECEIPT_HINT: Regex = Regex::new(
        r"(?i)receipt|영수증|주문|구입|purchase|₩|총계|합계"
    ).unwrap();
}
