//! HTML entity encoding for client-supplied text.
//!
//! Everything a comment carries that came from the client is encoded before
//! storage, so stored rows are safe to hand to the player UI verbatim.

use std::borrow::Cow;

/// HTML-encode a client-supplied string.
///
/// Escapes `&`, `<`, `>`, `"` and `'`. Returns an owned string only when
/// something actually needed escaping.
pub fn encode(input: &str) -> Cow<'_, str> {
    html_escape::encode_safe(input)
}
