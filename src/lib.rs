//! Decoding of ASP.NET `__VIEWSTATE` payloads captured from HTTP traffic.
//!
//! The pipeline runs strictly forward: the base64 loader produces a raw
//! buffer, the envelope validator strips the magic header and trailing
//! signature, the recursive descent decoder turns the body into a tree of
//! tagged nodes, and the builder packages tree and signature for whatever
//! renders or logs them. Input is untrusted by assumption; no byte
//! sequence can make a decode panic, recurse without bound, or read out of
//! range. Each decode owns its buffer and produces an immutable result, so
//! concurrent decodes need no locking.

pub mod decode;
pub mod envelope;
pub mod error;
pub mod form;
pub mod io_utils;
pub mod node;
pub mod payload;
pub mod render;
pub mod tree;

pub use decode::{decode_body, decode_body_with_limit, decode_node, MAX_DEPTH};
pub use envelope::{is_valid, signature_hex, split, Envelope, MAGIC, SIGNATURE_LEN};
pub use error::ViewTreeError;
pub use form::extract_viewstate;
pub use node::Node;
pub use payload::decode_payload;
pub use render::render_text;
pub use tree::{build, build_from_base64, build_with_limit, DecodeResult, HASH_LABEL, STATE_LABEL};
