use crate::compat::String;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Base64-encode UTF-8 text (RFC 4648 standard alphabet, with padding).
pub fn base64_encode(input: &str) -> String {
    STANDARD.encode(input.as_bytes())
}

/// Decode base64 text back into a UTF-8 string.
///
/// Returns `None` when the input is not valid base64 or the decoded bytes
/// are not valid UTF-8.
pub fn base64_decode(input: &str) -> Option<String> {
    let bytes = STANDARD.decode(input).ok()?;
    String::from_utf8(bytes).ok()
}
