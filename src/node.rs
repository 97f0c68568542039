use serde::Serialize;

/// One element of the decoded result tree.
///
/// The structure is a pure tree, so plain owned recursion is safe; no arena
/// or index indirection is needed. `label` carries the fixed display form
/// `"<TypeName>(offset)"` and `offset` is the byte position at which
/// decoding of the node began. Across one decode pass, offsets visited in
/// document order strictly increase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Leaf {
        label: String,
        offset: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    Composite {
        label: String,
        offset: usize,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn leaf(name: &str, offset: usize) -> Self {
        Node::Leaf {
            label: tag_label(name, offset),
            offset,
            value: None,
        }
    }

    pub fn leaf_with_value(name: &str, offset: usize, value: String) -> Self {
        Node::Leaf {
            label: tag_label(name, offset),
            offset,
            value: Some(value),
        }
    }

    pub fn composite(name: &str, offset: usize, children: Vec<Node>) -> Self {
        Node::Composite {
            label: tag_label(name, offset),
            offset,
            children,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Node::Leaf { label, .. } | Node::Composite { label, .. } => label,
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            Node::Leaf { offset, .. } | Node::Composite { offset, .. } => *offset,
        }
    }

    /// Child nodes in decoding order; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Composite { children, .. } => children,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Leaf { value, .. } => value.as_deref(),
            Node::Composite { .. } => None,
        }
    }
}

/// Fixed display label for a decoded node.
pub(crate) fn tag_label(name: &str, offset: usize) -> String {
    format!("<{name}>({offset})")
}
