//! Won amount parsing and formatting.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{PRICE_NUMBER, WON_TOKEN};
use super::ExtractionMatch;

/// Standard won sign.
pub const WON_SIGN: char = '₩';

/// Full-width won sign used by the store receipts.
pub const FULLWIDTH_WON_SIGN: char = '￦';

/// Rewrite the full-width won sign to the standard one.
pub fn normalize_currency_glyph(s: &str) -> String {
    s.replace(FULLWIDTH_WON_SIGN, "₩")
}

/// Numeric value of a price string such as `₩1,200`.
///
/// Currency signs and grouping commas are dropped and the leading number is
/// read; trailing text (`원`, `(VAT 포함)`) is ignored. Returns `None` when
/// no number leads the string.
pub fn parse_price(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| *c != WON_SIGN && *c != FULLWIDTH_WON_SIGN && *c != ',')
        .collect();

    let number = PRICE_NUMBER.find(cleaned.trim())?;
    Decimal::from_str(number.as_str()).ok()
}

/// Numeric value of a price, zero when it has none.
pub fn price_value(s: &str) -> Decimal {
    parse_price(s).unwrap_or(Decimal::ZERO)
}

/// Format an amount with a currency prefix and thousands grouping
/// (`₩12,345`). Up to three fraction digits are kept, trailing zeros dropped.
pub fn format_price(amount: Decimal, symbol: &str) -> String {
    let s = amount.round_dp(3).normalize().to_string();
    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (integer_part, fraction) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let chars: Vec<char> = integer_part.chars().collect();
    let mut grouped = String::new();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    match fraction {
        Some(frac) => format!("{sign}{symbol}{grouped}.{frac}"),
        None => format!("{sign}{symbol}{grouped}"),
    }
}

/// Every won token in `text`, in document order, with the sign normalized.
pub fn find_won_tokens(text: &str) -> Vec<ExtractionMatch<Decimal>> {
    WON_TOKEN
        .captures_iter(text)
        .filter_map(|caps| {
            let full = caps.get(0)?;
            let digits = caps[1].trim_end_matches(',');
            let value = price_value(digits);
            Some(
                ExtractionMatch::new(value, format!("{WON_SIGN}{digits}"))
                    .with_position(full.start(), full.end()),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("₩1,200"), Some(dec("1200")));
        assert_eq!(parse_price("￦3,300"), Some(dec("3300")));
        assert_eq!(parse_price(" ₩12,345,678 "), Some(dec("12345678")));
        assert_eq!(parse_price("₩4,400원"), Some(dec("4400")));
        assert_eq!(parse_price("1200.50"), Some(dec("1200.50")));
    }

    #[test]
    fn test_parse_price_without_number() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("무료"), None);
        assert_eq!(price_value("Free"), Decimal::ZERO);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(dec("1200"), "₩"), "₩1,200");
        assert_eq!(format_price(dec("500"), "₩"), "₩500");
        assert_eq!(format_price(dec("12345678"), "₩"), "₩12,345,678");
        assert_eq!(format_price(dec("1200.50"), "₩"), "₩1,200.5");
        assert_eq!(format_price(dec("1000.00"), "₩"), "₩1,000");
    }

    #[test]
    fn test_normalize_currency_glyph() {
        assert_eq!(normalize_currency_glyph("￦3,300"), "₩3,300");
        assert_eq!(normalize_currency_glyph("₩3,300"), "₩3,300");
    }

    #[test]
    fn test_find_won_tokens() {
        let tokens = find_won_tokens("소계 ₩500, 합계 ￦1,500, 기타 1,000원");
        let sources: Vec<&str> = tokens.iter().map(|t| t.source.as_str()).collect();
        assert_eq!(sources, vec!["₩500", "₩1,500"]);
        assert_eq!(tokens[1].value, dec("1500"));
        assert_eq!(tokens[0].position, Some((7, 13)));
    }

    #[test]
    fn test_won_sign_must_touch_digits() {
        assert!(find_won_tokens("합계 ₩ 1,500").is_empty());
    }
}
