use crate::compat::{Cow, String, ToString};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Full percent-encode set: every byte outside the RFC 3986 unreserved set
/// `A-Z a-z 0-9 - _ . ~`. Reserved delimiters and space are escaped too, so
/// encoded tokens are safe in any URL component.
pub const UNRESERVED_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a token for embedding in a URL.
///
/// Escapes every UTF-8 octet outside the unreserved set as uppercase `%XX`.
/// Output is always ASCII; any input string is encodable.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, UNRESERVED_ENCODE_SET).to_string()
}

/// Percent-encode a token directly into a buffer.
pub fn percent_encode_into(buffer: &mut String, input: &str) {
    buffer.reserve(input.len());
    for chunk in utf8_percent_encode(input, UNRESERVED_ENCODE_SET) {
        buffer.push_str(chunk);
    }
}

/// Decode a percent-encoded token.
///
/// Decoding is lenient: malformed escape sequences (truncated `%`, non-hex
/// digits) pass through literally, and invalid UTF-8 is replaced lossily.
/// When `decode_plus_as_space` is set, literal `+` becomes a space before
/// unescaping (the form-encoding convention used for query strings; path and
/// fragment decoding leave `+` alone).
pub fn percent_decode(input: &str, decode_plus_as_space: bool) -> String {
    let input: Cow<'_, str> = if decode_plus_as_space && input.contains('+') {
        Cow::Owned(input.replace('+', " "))
    } else {
        Cow::Borrowed(input)
    };
    percent_encoding::percent_decode_str(&input)
        .decode_utf8_lossy()
        .into_owned()
}
