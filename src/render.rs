//! Debug renderings of parse trees.
//!
//! Two flat external forms, neither used by the engine itself: a nested array
//! `[name, result, offset, length, kind, tail]` and an indented text listing
//! with one node per line.

use std::fmt::Write as _;

use serde_json::{json, Value};

use crate::node::Node;

/// Controls the `tail` element of [`to_array`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayOptions {
    /// Successful leaves show their matched text instead of an empty list.
    pub leaves: bool,
    /// Show child arrays; when off, only the child count.
    pub children: bool,
}

impl Default for ArrayOptions {
    fn default() -> Self {
        Self {
            leaves: false,
            children: true,
        }
    }
}

impl ArrayOptions {
    pub fn leaves() -> Self {
        Self {
            leaves: true,
            children: true,
        }
    }
}

pub fn to_array(node: &Node, source: &str, opts: ArrayOptions) -> Value {
    let tail = if opts.leaves && node.is_success() && node.is_leaf() {
        Value::String(node.text(source).to_string())
    } else if opts.children {
        Value::Array(
            node.children
                .iter()
                .map(|c| to_array(c, source, opts))
                .collect(),
        )
    } else {
        json!(node.children.len())
    };
    json!([
        node.name,
        node.outcome.code(),
        node.offset,
        node.length,
        node.kind.as_str(),
        tail
    ])
}

/// Indented listing: `<result> <name> <offset>,<length>` plus the matched text
/// of successful leaves. Unnamed nodes show `_`.
pub fn to_text(node: &Node, source: &str) -> String {
    let mut out = String::new();
    write_node(&mut out, node, source, 0);
    out
}

/// The single line `to_text` prints for `node`, without indentation.
pub fn line(node: &Node, source: &str) -> String {
    let mut out = format!(
        "{} {} {},{}",
        node.outcome.code(),
        node.name.as_deref().unwrap_or("_"),
        node.offset,
        node.length
    );
    if node.is_success() && node.is_leaf() {
        let _ = write!(out, " {:?}", node.text(source));
    }
    out
}

fn write_node(out: &mut String, node: &Node, source: &str, depth: usize) {
    if depth > 0 {
        out.push('\n');
    }
    out.push_str(&"  ".repeat(depth));
    out.push_str(&line(node, source));
    for child in &node.children {
        write_node(out, child, source, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Kind, Outcome};

    fn tree() -> Node {
        let mut a = Node::new(None, Kind::Pattern, 0);
        a.outcome = Outcome::Success;
        a.length = 1;
        let sep = Node::new(None, Kind::Literal, 1);
        let mut root = Node::new(Some("list"), Kind::JoinedSequence, 0);
        root.outcome = Outcome::Success;
        root.length = 1;
        root.children = vec![a, sep];
        root
    }

    #[test]
    fn test_array_with_leaves() {
        let value = to_array(&tree(), "a", ArrayOptions::leaves());
        assert_eq!(
            value,
            json!(["list", 1, 0, 1, "jseq", [
                [null, 1, 0, 1, "rex", "a"],
                [null, 0, 1, 0, "str", []]
            ]])
        );
    }

    #[test]
    fn test_array_child_counts() {
        let opts = ArrayOptions {
            leaves: false,
            children: false,
        };
        assert_eq!(to_array(&tree(), "a", opts), json!(["list", 1, 0, 1, "jseq", 2]));
    }

    #[test]
    fn test_text_form() {
        assert_eq!(to_text(&tree(), "a"), "1 list 0,1\n  1 _ 0,1 \"a\"\n  0 _ 1,0");
    }
}
