#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod encoding;
mod query;
mod request;
mod url_parts;

// String-level splicing helpers (query/fragment/path on raw URL strings)
pub mod url_string;

// Public API
pub use encoding::base64::{base64_decode, base64_encode};
pub use encoding::percent::{percent_decode, percent_encode};
pub use query::{DuplicatePolicy, QueryOptions, QueryParams, Value};
pub use request::{FORM_URLENCODED, HttpRequest, Request};
pub use url_parts::UrlParts;
