use rand::Rng;
use viewtree::{build, decode_body, decode_body_with_limit, decode_node, Node, MAX_DEPTH};

fn tree_depth(node: &Node) -> usize {
    1 + node
        .children()
        .iter()
        .map(tree_depth)
        .max()
        .unwrap_or(0)
}

#[test]
fn deeply_nested_pairs_do_not_exhaust_the_stack() {
    let body = vec![0x0F; 100_000];
    let node = decode_body(&body);
    assert!(tree_depth(&node) <= MAX_DEPTH + 1);
}

#[test]
fn depth_bound_truncates_with_an_unknown_leaf() {
    let body = [0x0F, 0x0F, 0x0F, 0x64, 0x64];
    let node = decode_body_with_limit(&body, 2);
    let inner = &node.children()[0];
    assert_eq!(inner.label(), "<Pair>(1)");
    // The third pair tag sits past the bound and is not recursed into.
    assert_eq!(inner.children()[0].label(), "<Unknown-0xf>(2)");
}

#[test]
fn array_list_count_larger_than_stream_is_bounded() {
    // Declares 255 children with no bytes behind them.
    let body = [0x16, 0xFF];
    let (node, next) = decode_node(&body, 0, MAX_DEPTH);
    assert_eq!(node.label(), "<ArrayList>(0)");
    assert_eq!(node.children().len(), 1);
    assert_eq!(node.children()[0].label(), "<End>(2)");
    assert_eq!(next, 2);
}

#[test]
fn array_list_missing_count_byte_is_truncated() {
    let (node, next) = decode_node(&[0x16], 0, MAX_DEPTH);
    assert_eq!(node.label(), "<Truncated>(0)");
    assert_eq!(next, 1);
}

#[test]
fn string_running_to_exact_stream_end_is_fine() {
    let body = [0x05, 0x02, b'h', b'i'];
    let (node, next) = decode_node(&body, 0, MAX_DEPTH);
    assert_eq!(node.value(), Some("hi"));
    assert_eq!(next, 4);
}

#[test]
fn non_utf8_string_content_decodes_lossily() {
    let body = [0x05, 0x02, 0xFF, 0xFE];
    let (node, _) = decode_node(&body, 0, MAX_DEPTH);
    assert_eq!(node.value(), Some("\u{FFFD}\u{FFFD}"));
}

#[test]
fn every_prefix_of_a_real_payload_decodes() {
    // Triple(Pair(String, Int32), ArrayList[Null, Null], Null) behind the
    // envelope; every truncation of it must still produce a result.
    let mut raw = vec![
        0xFF, 0x01, 0x10, 0x0F, 0x05, 0x03, b'k', b'e', b'y', 0x02, 0x07, 0x16, 0x02, 0x64,
        0x64, 0x64,
    ];
    raw.extend(0u8..20);
    for cut in 0..=raw.len() {
        let result = build(&raw[..cut]);
        assert_eq!(result.valid, result.diagnostic.is_none());
    }
}

#[test]
fn single_bit_flip_fuzz() {
    // Flip one bit anywhere in a well-formed payload; the decode must stay
    // total and the validity flag must keep matching the diagnostic.
    let mut raw = vec![0xFF, 0x01, 0x10, 0x0F, 0x64, 0x64, 0x05, 0x02, b'o', b'k', 0x02, 0x63];
    raw.extend(0u8..20);
    let total_bits = raw.len() * 8;
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        let mut buf = raw.clone();
        let bit = rng.gen_range(0..total_bits);
        buf[bit / 8] ^= 1u8 << (7 - (bit % 8));
        let result = build(&buf);
        assert_eq!(result.valid, result.diagnostic.is_none());
    }
}

#[test]
fn zero_count_array_list_has_no_children() {
    let body = [0x16, 0x00, 0x64];
    let (node, next) = decode_node(&body, 0, MAX_DEPTH);
    assert_eq!(node.label(), "<ArrayList>(0)");
    assert!(node.children().is_empty());
    assert_eq!(next, 2);
}
