//! Diagnostic values for the pyrite parser.
//!
//! - Error codes for searchability
//! - The `SyntaxError` value handed back to callers (source name, line,
//!   character column, line text, message)
//! - Line/column utilities, including byte-to-character column conversion

mod error_code;
pub mod span_utils;
mod syntax_error;

pub use error_code::ErrorCode;
pub use span_utils::{byte_offset_to_char_offset, LineOffsetTable};
pub use syntax_error::SyntaxError;
