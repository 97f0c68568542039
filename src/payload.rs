use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::ViewTreeError;

/// Decode a URL-decoded `__VIEWSTATE` value into its raw bytes.
///
/// Surrounding whitespace is tolerated so values pasted or read from files
/// with a trailing newline decode cleanly. A malformed value is reported as
/// [`ViewTreeError::Encoding`]; callers present the field as an opaque blob
/// in that case rather than aborting the inspection.
pub fn decode_payload(field: &str) -> Result<Vec<u8>, ViewTreeError> {
    Ok(STANDARD.decode(field.trim())?)
}
