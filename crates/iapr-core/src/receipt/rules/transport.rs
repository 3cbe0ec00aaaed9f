//! Quoted-printable transport decoding.

use quoted_printable::ParseMode;
use tracing::{trace, warn};

use super::patterns::QP_ESCAPE;

/// Decode a possibly quoted-printable body into UTF-8 text.
///
/// Bodies without any escape sequence are returned as-is, and so are bodies
/// carrying non-ASCII text, since a quoted-printable body is 7-bit. If
/// decoding fails or the decoded bytes are not valid UTF-8, the input is
/// returned unchanged so later stages can still work on the raw markup.
pub fn decode(raw: &str) -> String {
    if !is_transport_encoded(raw) {
        return raw.to_string();
    }

    let bytes = match quoted_printable::decode(raw.as_bytes(), ParseMode::Robust) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Quoted-printable decoding failed, using raw body: {}", e);
            return raw.to_string();
        }
    };

    match String::from_utf8(bytes) {
        Ok(text) => {
            trace!("Decoded {} bytes into {} bytes", raw.len(), text.len());
            text
        }
        Err(e) => {
            warn!("Decoded body is not valid UTF-8, using raw body: {}", e);
            raw.to_string()
        }
    }
}

/// True when 7-bit text carries quoted-printable escapes or soft line
/// breaks. Non-ASCII text is never transport encoded.
pub fn is_transport_encoded(text: &str) -> bool {
    text.is_ascii() && QP_ESCAPE.is_match(text)
}
