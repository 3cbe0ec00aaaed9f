//! Brand detection by signature markers.

use crate::models::receipt::Brand;

/// Markers that identify one vendor template.
struct Signature {
    brand: Brand,
    markers: &'static [&'static str],
}

impl Signature {
    fn matches(&self, text: &str) -> bool {
        self.markers.iter().any(|marker| text.contains(marker))
    }
}

/// Checked in order; forwarded mail carrying both vendors' markers resolves
/// to the first entry.
const SIGNATURES: &[Signature] = &[
    Signature {
        brand: Brand::AppleStyle,
        markers: &["apple.com", "Apple ID", "주문 ID:"],
    },
    Signature {
        brand: Brand::SamsungStyle,
        markers: &["samsung.com", "Galaxy Store", "애플리케이션 이름"],
    },
];

/// Select the extraction strategy for decoded content.
pub fn classify(decoded: &str) -> Brand {
    SIGNATURES
        .iter()
        .find(|signature| signature.matches(decoded))
        .map(|signature| signature.brand)
        .unwrap_or(Brand::Unknown)
}
