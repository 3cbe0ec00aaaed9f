//! End-to-end receipt scenarios through the public parser API.

use iapr_core::receipt::rules::{decode, parse_price, price_value};
use iapr_core::receipt::sum_prices;
use iapr_core::{parse_receipt, Brand, ExtractedItem, ParseResult, ReceiptParser};
use pretty_assertions::assert_eq;

const UNKNOWN: &str = "알 수 없음";

fn lockup(app: &str, product: &str, price: &str) -> String {
    format!(
        r#"<table class="subscription-lockup__container" role="presentation"><tr><td>
            <p class="custom-gzadzy">{app}</p>
            <p class="custom-wogfc8">{product}</p>
            <p class="custom-137u684">{price}</p>
        </td></tr></table>"#
    )
}

fn store_row(label: &str, value: &str) -> String {
    format!(
        r#"<tr><td class="label">- {label}</td><td width="8"></td><td class="value">{value}</td></tr>"#
    )
}

const ENCODED_APPLE_RECEIPT: &str = "<html><body><p>Apple ID: user@example.com</p><p class=3D\"o\">=EC=A3=BC=EB=AC=\n\
=B8 ID:</p><p class=3D\"o\">MQ7XK2L9PD</p>\n\
<table class=3D\"subscription-lockup__container\"><tr><td><p class=3D\"custom-=\n\
gzadzy\">Music Pro</p><p class=3D\"custom-wogfc8\">=ED=94=84=EB=A6=AC=EB=AF=B8=\n\
=EC=97=84 =EA=B5=AC=EB=8F=85</p><p class=3D\"custom-137u684\">=E2=82=A99,900<=\n\
/p></td></tr></table>\n\
</body></html>";

#[test]
fn scenario_lockup_receipt_with_order_id() {
    let html = format!(
        "<html><body><div><p>주문 ID:</p><p>ABC123XYZ</p></div>{}</body></html>",
        lockup("Game Plus", "월간 구독권", "₩1,200")
    );

    let result = parse_receipt(&html);
    assert_eq!(result.order_id, "ABC123XYZ");
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].app_name, "Game Plus");
    assert_eq!(result.items[0].price, "₩1,200");
    assert_eq!(result.total_price, "₩1,200");
}

#[test]
fn scenario_store_receipt_rewrites_currency_glyph() {
    let html = format!(
        "<html><body>Galaxy Store<table><tr><td><table>{}{}{}</table></td></tr></table></body></html>",
        store_row("애플리케이션 이름", "<b>Fit App</b>"),
        store_row("주문 번호", "P20250114093000123"),
        store_row("합계", "￦3,300"),
    );

    let outcome = ReceiptParser::new().parse_detailed(&html);
    assert_eq!(outcome.brand, Brand::SamsungStyle);
    assert_eq!(
        outcome.result,
        ParseResult {
            order_id: "P20250114093000123".to_string(),
            total_price: "₩3,300".to_string(),
            items: vec![ExtractedItem::new("Fit App", "", "₩3,300")],
        }
    );
}

#[test]
fn scenario_unknown_vendor_picks_largest_amount() {
    let outcome = ReceiptParser::new().parse_detailed("<p>단가 ₩500</p><p>결제 금액 ₩1,500</p>");

    assert_eq!(outcome.brand, Brand::Unknown);
    assert!(outcome.used_fallback);
    assert_eq!(
        outcome.result.items,
        vec![ExtractedItem::new(UNKNOWN, "", "₩1,500")]
    );
    assert_eq!(outcome.result.total_price, "₩1,500");
}

#[test]
fn scenario_nothing_recognizable() {
    let result = parse_receipt("<p>Thanks for signing up!</p>");
    assert_eq!(result, ParseResult::default());
    assert!(result.items.is_empty());
    assert_eq!(result.order_id, "");
    assert_eq!(result.total_price, "");
}

#[test]
fn scenario_short_order_id_rejected() {
    let html = format!(
        "<div><p>주문 ID:</p><p>ab</p></div>{}",
        lockup("Game Plus", "", "₩1,200")
    );
    let result = parse_receipt(&html);
    assert_eq!(result.order_id, "");
    assert_eq!(result.items.len(), 1);
}

#[test]
fn transport_encoded_lockup_receipt() {
    let result = parse_receipt(ENCODED_APPLE_RECEIPT);
    assert_eq!(result.order_id, "MQ7XK2L9PD");
    assert_eq!(
        result.items,
        vec![ExtractedItem::new("Music Pro", "프리미엄 구독", "₩9,900")]
    );
    assert_eq!(result.total_price, "₩9,900");
}

#[test]
fn multi_item_total_is_derived_from_items() {
    let html = format!(
        "<p>주문 ID:</p><p>MLZZ00112</p>{}{}{}",
        lockup("Game Plus", "보석 500개", "₩1,200"),
        lockup("Study Notes", "광고 제거", "₩3,300"),
        lockup("Weather Live", "위젯 팩", "₩12,000"),
    );

    let result = parse_receipt(&html);
    assert_eq!(result.items.len(), 3);
    assert_eq!(sum_prices(&result.items), price_value("₩16,500"));
    assert_eq!(result.total_price, "₩16,500");
    for item in &result.items {
        assert!(parse_price(&item.price).is_some(), "price {:?}", item.price);
        assert!(item.price.starts_with('₩'));
    }
}

#[test]
fn structured_items_are_preferred_over_larger_amounts() {
    // A larger amount elsewhere in the mail must not replace the lockup item.
    let html = format!(
        "<p>Apple ID</p>{}<p>카드 한도 ₩5,000,000</p>",
        lockup("Game Plus", "", "₩1,200")
    );
    let result = parse_receipt(&html);
    assert_eq!(result.items, vec![ExtractedItem::new("Game Plus", "", "₩1,200")]);
}

#[test]
fn plain_bodies_are_not_altered_by_decoding() {
    let bodies = [
        "<p class=\"a\">₩1,200</p>",
        "plain text, no markup at all",
        "a = b and c == d",
        "<td width=100 height=20>₩1,200</td>",
        "<a href=\"https://example.com/r?id=12345\">주문 ID:</a>",
        "",
    ];
    for body in bodies {
        assert_eq!(decode(body), body);
    }
}

#[test]
fn plain_store_receipt_with_hex_like_link_keeps_its_text() {
    let html = format!(
        r#"<html><body>Galaxy Store <a href="https://example.com/detail?id=12345">상세</a><table>{}{}</table></body></html>"#,
        store_row("애플리케이션 이름", "Fit App"),
        store_row("합계", "￦3,300"),
    );

    let result = parse_receipt(&html);
    assert_eq!(result.items, vec![ExtractedItem::new("Fit App", "", "₩3,300")]);
    assert_eq!(result.total_price, "₩3,300");
}

#[test]
fn overflowing_price_sum_does_not_abort_parsing() {
    let huge = "₩50,000,000,000,000,000,000,000,000,000";
    let html = format!(
        "<html><body><p>Apple ID: user@example.com</p>{}{}</body></html>",
        lockup("Game Plus", "", huge),
        lockup("Music Pro", "", huge)
    );

    let result = parse_receipt(&html);
    assert_eq!(result.items.len(), 2);
    assert_eq!(result.total_price, huge);

    let items = vec![
        ExtractedItem::new("A", "", "₩99,999,999,999,999,999,999,999,999,999"),
        ExtractedItem::new("B", "", "₩700"),
    ];
    assert_eq!(sum_prices(&items), price_value("₩700"));
}

#[test]
fn classification_is_deterministic_for_forwarded_mail() {
    let forwarded = format!(
        "Galaxy Store 구매 영수증 {} ---- forwarded from apple.com ---- {}",
        store_row("합계", "￦3,300"),
        lockup("Game Plus", "", "₩1,200")
    );
    let parser = ReceiptParser::new();
    let first = parser.parse_detailed(&forwarded);
    let second = parser.parse_detailed(&forwarded);
    assert_eq!(first.brand, Brand::AppleStyle);
    assert_eq!(first.result, second.result);
}
