//! RFC 3986 percent-encoding as required by OAuth 1.0a.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except the unreserved set `ALPHA / DIGIT / "-" / "." / "_" / "~"`.
const OAUTH_RESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string for use in a signature base string or header.
///
/// Hex digits are uppercase and multi-byte characters are encoded per UTF-8
/// byte, so `encodeURIComponent`-style output for `!*'()` is not produced.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_RESERVED).to_string()
}
