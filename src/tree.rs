//! Assembles decoder output into the result handed to consumers.
//!
//! Building is best effort and never propagates a fault: terminal loader
//! and validator errors become a `valid = false` result carrying a
//! diagnostic, with the signature still shown whenever the buffer is long
//! enough to contain one.

use serde::Serialize;

use crate::decode::{decode_node, MAX_DEPTH};
use crate::envelope::{self, MAGIC, SIGNATURE_LEN};
use crate::error::ViewTreeError;
use crate::node::Node;
use crate::payload;

/// Label of the state tree root.
pub const STATE_LABEL: &str = "<ViewState>";

/// Label of the signature leaf.
pub const HASH_LABEL: &str = "<ViewStateHash>";

/// Final decode output: the state tree, the signature leaf, and the error
/// surface (a validity flag plus an optional human-readable diagnostic).
/// Immutable once built; nothing persists across decodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeResult {
    /// Root of the decoded state tree, labeled `<ViewState>`.
    pub tree: Node,
    /// Signature leaf labeled `<ViewStateHash>`; its value is the
    /// colon-separated hex rendering, `None` when no signature could be
    /// extracted.
    pub hash: Node,
    /// False when the payload failed loading or validation.
    pub valid: bool,
    /// Reason the payload was rejected, when `valid` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

/// Decode a raw payload into a result tree. Total over all inputs.
///
/// Node offsets are relative to the raw payload, so the first body node
/// sits at offset 2, just past the magic.
pub fn build(raw: &[u8]) -> DecodeResult {
    build_with_limit(raw, MAX_DEPTH)
}

/// [`build`] with an explicit recursion depth bound.
pub fn build_with_limit(raw: &[u8], max_depth: usize) -> DecodeResult {
    match envelope::split(raw) {
        Ok(env) => {
            // Decode over the raw buffer up to the signature so reported
            // offsets count the magic header.
            let stream = &raw[..raw.len() - SIGNATURE_LEN];
            let (root, _) = decode_node(stream, MAGIC.len(), max_depth);
            DecodeResult {
                tree: state_root(vec![root]),
                hash: hash_leaf(raw, Some(envelope::signature_hex(env.signature))),
                valid: true,
                diagnostic: None,
            }
        }
        Err(err) => invalid_result(raw, &err),
    }
}

/// Decode a URL-decoded base64 field value. Total over all inputs: a
/// malformed value yields an empty, invalid result rather than an error.
pub fn build_from_base64(field: &str) -> DecodeResult {
    match payload::decode_payload(field) {
        Ok(raw) => build(&raw),
        Err(err) => DecodeResult {
            tree: state_root(Vec::new()),
            hash: hash_leaf(&[], None),
            valid: false,
            diagnostic: Some(err.to_string()),
        },
    }
}

// Validation failed. The signature is still extractable whenever the raw
// buffer can hold one, magic or no magic.
fn invalid_result(raw: &[u8], err: &ViewTreeError) -> DecodeResult {
    let value = if raw.len() >= SIGNATURE_LEN {
        Some(envelope::signature_hex(&raw[raw.len() - SIGNATURE_LEN..]))
    } else {
        None
    };
    DecodeResult {
        tree: state_root(Vec::new()),
        hash: hash_leaf(raw, value),
        valid: false,
        diagnostic: Some(err.to_string()),
    }
}

fn state_root(children: Vec<Node>) -> Node {
    Node::Composite {
        label: STATE_LABEL.to_string(),
        offset: 0,
        children,
    }
}

fn hash_leaf(raw: &[u8], value: Option<String>) -> Node {
    Node::Leaf {
        label: HASH_LABEL.to_string(),
        offset: raw.len().saturating_sub(SIGNATURE_LEN),
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_signature(body: &[u8]) -> Vec<u8> {
        let mut raw = vec![0xFF, 0x01];
        raw.extend_from_slice(body);
        raw.extend(0u8..20);
        raw
    }

    #[test]
    fn wraps_decoded_root_under_state_label() {
        let result = build(&with_signature(&[0x0F, 0x64, 0x64]));
        assert!(result.valid);
        assert_eq!(result.tree.label(), STATE_LABEL);
        assert_eq!(result.tree.children().len(), 1);
        assert_eq!(result.tree.children()[0].label(), "<Pair>(2)");
    }

    #[test]
    fn empty_body_decodes_to_single_end_leaf() {
        let result = build(&with_signature(&[]));
        assert!(result.valid);
        assert_eq!(result.tree.children().len(), 1);
        assert_eq!(result.tree.children()[0].label(), "<End>(2)");
    }

    #[test]
    fn invalid_magic_keeps_signature_and_diagnostic() {
        let mut raw = vec![0x00, 0x01, 0x64];
        raw.extend([0xAA; 20]);
        let result = build(&raw);
        assert!(!result.valid);
        assert!(result.tree.children().is_empty());
        assert_eq!(result.hash.label(), HASH_LABEL);
        let hex = result.hash.value().unwrap();
        assert!(hex.starts_with("aa:aa"));
        assert!(result.diagnostic.as_deref().unwrap().contains("magic"));
    }

    #[test]
    fn tiny_buffer_has_no_signature() {
        let result = build(&[0xFF]);
        assert!(!result.valid);
        assert_eq!(result.hash.value(), None);
        assert!(result.diagnostic.is_some());
    }

    #[test]
    fn bad_base64_is_diagnosed_not_fatal() {
        let result = build_from_base64("@@@not base64@@@");
        assert!(!result.valid);
        assert!(result.tree.children().is_empty());
        assert!(result
            .diagnostic
            .as_deref()
            .unwrap()
            .contains("base64"));
    }

    #[test]
    fn base64_roundtrip_through_loader() {
        // Pair(Null, Null) behind the envelope, base64 encoded.
        let raw = with_signature(&[0x0F, 0x64, 0x64]);
        let field = {
            use base64::{engine::general_purpose::STANDARD, Engine as _};
            STANDARD.encode(&raw)
        };
        let result = build_from_base64(&field);
        assert!(result.valid);
        assert_eq!(result.tree.children()[0].label(), "<Pair>(2)");
    }
}
