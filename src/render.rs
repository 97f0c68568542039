//! Text rendering of decode results.
//!
//! One row per node, indented two spaces per level; a leaf's value sits one
//! level beneath its label, the same parent/child shape a tree widget would
//! show. Machine-readable output goes through serde instead.

use std::fmt::Write;

use crate::node::Node;
use crate::tree::DecodeResult;

/// Render a result as an indented text tree. An invalid result leads with
/// its diagnostic line.
pub fn render_text(result: &DecodeResult) -> String {
    let mut out = String::new();
    if let Some(msg) = &result.diagnostic {
        let _ = writeln!(out, "! {msg}");
    }
    render_node(&result.tree, 0, &mut out);
    render_node(&result.hash, 0, &mut out);
    out
}

fn render_node(node: &Node, depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);
    match node {
        Node::Leaf { label, value, .. } => {
            let _ = writeln!(out, "{pad}{label}");
            if let Some(value) = value {
                let _ = writeln!(out, "{pad}  {value}");
            }
        }
        Node::Composite {
            label, children, ..
        } => {
            let _ = writeln!(out, "{pad}{label}");
            for child in children {
                render_node(child, depth + 1, out);
            }
        }
    }
}
