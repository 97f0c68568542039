//! Payload envelope handling.
//!
//! A serialized ViewState has three regions:
//!
//! ```text
//! [0xFF 0x01][serialized body ...][20-byte signature]
//! ```
//!
//! The two-byte magic identifies the format version and is mandatory. The
//! trailing signature is appended by the origin server and is treated as an
//! opaque token: it is displayed as hex but never recomputed or verified,
//! since no key material is available to an intercepting proxy.

use crate::error::ViewTreeError;

/// Fixed two-byte prefix identifying the serialization format.
pub const MAGIC: [u8; 2] = [0xFF, 0x01];

/// Length in bytes of the trailing integrity signature.
pub const SIGNATURE_LEN: usize = 20;

/// Borrowed view of a raw payload split into its regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    /// Serialized body strictly between the magic header and the signature.
    pub body: &'a [u8],
    /// Trailing opaque signature bytes.
    pub signature: &'a [u8],
}

/// Check for the magic prefix. Never panics, regardless of input length.
pub fn is_valid(raw: &[u8]) -> bool {
    raw.starts_with(&MAGIC)
}

/// Split a raw payload into its body and signature regions.
pub fn split(raw: &[u8]) -> Result<Envelope<'_>, ViewTreeError> {
    if !is_valid(raw) {
        return Err(ViewTreeError::InvalidMagic);
    }
    if raw.len() < MAGIC.len() + SIGNATURE_LEN {
        return Err(ViewTreeError::TooShort { len: raw.len() });
    }
    let sig_at = raw.len() - SIGNATURE_LEN;
    Ok(Envelope {
        body: &raw[MAGIC.len()..sig_at],
        signature: &raw[sig_at..],
    })
}

/// Render signature bytes as colon-separated lowercase hex pairs.
pub fn signature_hex(sig: &[u8]) -> String {
    sig.iter()
        .map(|b| hex::encode([*b]))
        .collect::<Vec<_>>()
        .join(":")
}
