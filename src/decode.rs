//! Recursive descent decoder for the ViewState body serialization.
//!
//! Each serialized unit starts with a one-byte type tag:
//!
//! ```text
//! 0x02 Int32                     value byte follows
//! 0x05 SystemString              length byte, then raw content
//! 0x1E SystemWebUiIndexedString  same shape as SystemString
//! 0x64 Null                      zero-width
//! 0x0F Pair                      2 children
//! 0x10 Triple                    3 children
//! 0x16 ArrayList                 count byte, then that many children
//! ```
//!
//! The input arrives from untrusted network traffic, so decoding is total:
//! no byte content, truncated length field, or unrecognized tag can make it
//! panic or read out of range. Running off the end of the stream emits one
//! terminal `<End>` leaf and unwinds; a length field pointing past the
//! buffer emits a `<Truncated>` leaf and stops; anything else unrecognized
//! becomes a one-byte `<Unknown-0xHH>` leaf and decoding resumes at the
//! next byte.

use crate::node::Node;

/// Bound on recursion depth for nested composite records. Past the bound a
/// composite tag degrades to an `<Unknown-0xHH>` leaf instead of recursing,
/// so adversarially nested payloads cannot exhaust the stack.
pub const MAX_DEPTH: usize = 64;

const TAG_INT32: u8 = 0x02;
const TAG_STRING: u8 = 0x05;
const TAG_INDEXED_STRING: u8 = 0x1E;
const TAG_NULL: u8 = 0x64;
const TAG_PAIR: u8 = 0x0F;
const TAG_TRIPLE: u8 = 0x10;
const TAG_ARRAY_LIST: u8 = 0x16;

// Tags seen in captures but not decoded yet, kept for reference:
// 0x07 Double, 0x15 SystemStringArray, 0x18 HybridDictionary,
// 0x1F SystemWebUiIndexedChar, 0x28 ClassType, 0x32 SerializedClass,
// 0x3C IndexedArray, 0x66 IntZero, 0x67 BooleanTrue, 0x68 BooleanFalse.

/// Decode the single top-level node of a body stream.
pub fn decode_body(body: &[u8]) -> Node {
    decode_body_with_limit(body, MAX_DEPTH)
}

/// Decode with an explicit recursion depth bound.
pub fn decode_body_with_limit(body: &[u8], max_depth: usize) -> Node {
    decode_node(body, 0, max_depth).0
}

/// Decode one node at `offset`, returning it with the offset of the first
/// byte it did not consume. The caller bounds the stream (for a full
/// payload, everything before the signature) and picks the offset base, so
/// reported offsets can be relative to either the body or the raw payload.
pub fn decode_node(stream: &[u8], offset: usize, depth: usize) -> (Node, usize) {
    let (node, next, _) = decode_at(stream, offset, depth);
    (node, next)
}

/// Inner decode. The third element is true once the stream has been
/// exhausted (an `<End>` leaf was emitted) or a truncated read stopped the
/// pass; enclosing composites then unwind without decoding more children.
fn decode_at(stream: &[u8], offset: usize, depth: usize) -> (Node, usize, bool) {
    if offset >= stream.len() {
        return (Node::leaf("End", offset), offset, true);
    }
    let tag = stream[offset];
    match tag {
        TAG_INT32 => decode_int(stream, offset),
        TAG_STRING => decode_string(stream, offset, "SystemString"),
        TAG_INDEXED_STRING => decode_string(stream, offset, "SystemWebUiIndexedString"),
        TAG_NULL => (Node::leaf("Null", offset), offset + 1, false),
        TAG_PAIR if depth > 0 => decode_composite(stream, offset, 2, "Pair", depth),
        TAG_TRIPLE if depth > 0 => decode_composite(stream, offset, 3, "Triple", depth),
        TAG_ARRAY_LIST if depth > 0 => decode_array_list(stream, offset, depth),
        _ => (
            Node::leaf(&format!("Unknown-0x{tag:x}"), offset),
            offset + 1,
            false,
        ),
    }
}

// Only one byte of the nominally four-byte integer is read for display.
fn decode_int(stream: &[u8], offset: usize) -> (Node, usize, bool) {
    match stream.get(offset + 1) {
        Some(b) => (
            Node::leaf_with_value("Int32", offset, b.to_string()),
            offset + 2,
            false,
        ),
        None => truncated(stream, offset),
    }
}

fn decode_string(stream: &[u8], offset: usize, name: &str) -> (Node, usize, bool) {
    let len = match stream.get(offset + 1) {
        Some(&len) => len as usize,
        None => return truncated(stream, offset),
    };
    let start = offset + 2;
    let end = start + len;
    if end > stream.len() {
        return truncated(stream, offset);
    }
    // Wire content is untrusted and need not be UTF-8.
    let content = String::from_utf8_lossy(&stream[start..end]).into_owned();
    (Node::leaf_with_value(name, offset, content), end, false)
}

fn decode_composite(
    stream: &[u8],
    offset: usize,
    count: usize,
    name: &str,
    depth: usize,
) -> (Node, usize, bool) {
    let (children, next, ended) = decode_children(stream, offset + 1, count, depth);
    (Node::composite(name, offset, children), next, ended)
}

fn decode_array_list(stream: &[u8], offset: usize, depth: usize) -> (Node, usize, bool) {
    let count = match stream.get(offset + 1) {
        Some(&count) => count as usize,
        None => return truncated(stream, offset),
    };
    let (children, next, ended) = decode_children(stream, offset + 2, count, depth);
    (Node::composite("ArrayList", offset, children), next, ended)
}

fn decode_children(
    stream: &[u8],
    start: usize,
    count: usize,
    depth: usize,
) -> (Vec<Node>, usize, bool) {
    let mut children = Vec::with_capacity(count);
    let mut next = start;
    for _ in 0..count {
        if next >= stream.len() {
            children.push(Node::leaf("End", next));
            return (children, next, true);
        }
        let (child, after, ended) = decode_at(stream, next, depth - 1);
        // Every dispatched branch must consume at least one byte.
        debug_assert!(after > next, "decoder failed to advance at offset {next}");
        children.push(child);
        next = after;
        if ended {
            return (children, next, true);
        }
    }
    (children, next, false)
}

// A declared length or a required byte points past the buffer. Emit a
// bounded leaf and stop the pass; nothing is read out of range.
fn truncated(stream: &[u8], offset: usize) -> (Node, usize, bool) {
    (Node::leaf("Truncated", offset), stream.len(), true)
}
