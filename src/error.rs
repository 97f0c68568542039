use thiserror::Error;

/// Terminal failures raised while loading or validating a payload.
///
/// Conditions inside the serialized body (truncated length fields,
/// unrecognized tags) are not represented here. The decoder recovers from
/// them in place by emitting `<Truncated>` or `<Unknown-0xHH>` leaves, so
/// they can never abort a decode.
#[derive(Debug, Error, PartialEq)]
pub enum ViewTreeError {
    /// The field value is not valid base64.
    #[error("invalid base64 payload: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// The decoded buffer does not start with the 0xFF 0x01 magic.
    #[error("missing .NET ViewState magic header")]
    InvalidMagic,

    /// The buffer is too small to hold both the magic header and the
    /// trailing signature.
    #[error("payload too short: {len} bytes cannot hold header and signature")]
    TooShort { len: usize },
}
