//! Parse-tree nodes.
//!
//! Every combinator invocation produces exactly one [`Node`]. A node starts out
//! as a `Fail` at the cursor position, collects the nodes of the sub-rules it
//! invoked, and is finalised with an outcome and a length when the combinator
//! concludes. Nodes own their children outright; trees never share subtrees.

use serde::Serialize;

use crate::cursor::Cursor;

// ============================================================================
// OUTCOME AND KIND
// ============================================================================

/// Tri-state result of a node.
///
/// `Error` is never produced by the built-in combinators. Custom matchers use
/// it to abort the whole parse instead of triggering backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    Error,
    Fail,
    Success,
}

impl Outcome {
    /// Numeric code used by the renderers: `-1`, `0` or `1`.
    pub fn code(self) -> i8 {
        match self {
            Outcome::Error => -1,
            Outcome::Fail => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }

    pub fn is_error(self) -> bool {
        self == Outcome::Error
    }
}

/// Which combinator produced a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Kind {
    Literal,
    Pattern,
    Sequence,
    Choice,
    GreedyChoice,
    Repetition,
    FullAnchor,
    DelimitedSequence,
    JoinedSequence,
    /// Produced by a user-written matcher.
    Custom(String),
}

impl Kind {
    /// Short tag used in the array and text renderings.
    pub fn as_str(&self) -> &str {
        match self {
            Kind::Literal => "str",
            Kind::Pattern => "rex",
            Kind::Sequence => "seq",
            Kind::Choice => "alt",
            Kind::GreedyChoice => "altg",
            Kind::Repetition => "rep",
            Kind::FullAnchor => "all",
            Kind::DelimitedSequence => "eseq",
            Kind::JoinedSequence => "jseq",
            Kind::Custom(tag) => tag,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// NODE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub name: Option<String>,
    pub kind: Kind,
    pub outcome: Outcome,
    /// Byte offset where the attempt started.
    pub offset: usize,
    /// Bytes matched; zero unless the node succeeded.
    pub length: usize,
    /// Reserved annotation slot. The engine never sets it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    /// A fresh `Fail` node at `offset`.
    pub fn new(name: Option<&str>, kind: Kind, offset: usize) -> Self {
        Self {
            name: name.map(str::to_string),
            kind,
            outcome: Outcome::Fail,
            offset,
            length: 0,
            note: None,
            children: Vec::new(),
        }
    }

    /// A fresh `Fail` node at the cursor's current position. Custom matchers
    /// start here.
    pub fn begin(name: Option<&str>, kind: Kind, cursor: &Cursor<'_>) -> Self {
        Self::new(name, kind, cursor.position())
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// A success that consumed nothing.
    pub fn is_empty(&self) -> bool {
        self.is_success() && self.length == 0
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn name_is(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// End offset of the matched span.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// The matched slice of `source`, empty if the span falls outside it.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.offset..self.end()).unwrap_or("")
    }

    pub fn successful_children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(|c| c.is_success())
    }

    /// Drops `Fail` children. `Error` children survive so an aborted parse can
    /// still be located. Running it twice changes nothing.
    pub fn prune(&mut self) {
        self.children.retain(|c| c.outcome != Outcome::Fail);
    }

    /// First node named `name`, depth first, starting with `self`.
    pub fn lookup(&self, name: &str) -> Option<&Node> {
        if self.name_is(name) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.lookup(name))
    }

    /// Every topmost node named `name`. A matching node's own subtree is not
    /// searched further.
    pub fn gather(&self, name: &str) -> Vec<&Node> {
        let mut acc = Vec::new();
        self.gather_into(name, &mut acc);
        acc
    }

    fn gather_into<'n>(&'n self, name: &str, acc: &mut Vec<&'n Node>) {
        if self.name_is(name) {
            acc.push(self);
        } else {
            for child in &self.children {
                child.gather_into(name, acc);
            }
        }
    }

    /// Children at odd indexes; the elements of a pruned `eseq` with a start rule.
    pub fn odd_children(&self) -> Vec<&Node> {
        self.children.iter().skip(1).step_by(2).collect()
    }

    /// Children at even indexes; the elements of a pruned `jseq`.
    pub fn even_children(&self) -> Vec<&Node> {
        self.children.iter().step_by(2).collect()
    }

    /// Depth-first search for the first `Error` node.
    pub fn find_error(&self) -> Option<&Node> {
        if self.outcome.is_error() && self.children.iter().all(|c| !c.outcome.is_error()) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: Option<&str>, offset: usize, length: usize, outcome: Outcome) -> Node {
        let mut node = Node::new(name, Kind::Literal, offset);
        node.outcome = outcome;
        node.length = length;
        node
    }

    fn sample() -> Node {
        let mut root = Node::new(Some("list"), Kind::JoinedSequence, 0);
        root.outcome = Outcome::Success;
        root.length = 3;
        root.children = vec![
            leaf(Some("item"), 0, 1, Outcome::Success),
            leaf(None, 1, 1, Outcome::Success),
            leaf(Some("item"), 2, 1, Outcome::Success),
            leaf(None, 3, 0, Outcome::Fail),
        ];
        root
    }

    #[test]
    fn test_prune_is_idempotent() {
        let mut node = sample();
        node.prune();
        assert_eq!(node.children.len(), 3);
        let once = node.clone();
        node.prune();
        assert_eq!(node, once);
        assert!(node.children.iter().all(Node::is_success));
    }

    #[test]
    fn test_prune_keeps_error_children() {
        let mut node = sample();
        node.children.push(leaf(Some("bang"), 3, 0, Outcome::Error));
        node.prune();
        assert_eq!(node.children.len(), 4);
        assert_eq!(node.find_error().and_then(|n| n.name.as_deref()), Some("bang"));
    }

    #[test]
    fn test_lookup_and_gather() {
        let node = sample();
        assert_eq!(node.lookup("list").map(|n| n.offset), Some(0));
        assert_eq!(node.lookup("item").map(|n| n.offset), Some(0));
        assert!(node.lookup("missing").is_none());
        assert_eq!(node.gather("item").len(), 2);
        // A match stops the descent.
        assert_eq!(node.gather("list").len(), 1);
    }

    #[test]
    fn test_odd_and_even_children() {
        let node = sample();
        let even: Vec<usize> = node.even_children().iter().map(|n| n.offset).collect();
        let odd: Vec<usize> = node.odd_children().iter().map(|n| n.offset).collect();
        assert_eq!(even, vec![0, 2]);
        assert_eq!(odd, vec![1, 3]);
    }

    #[test]
    fn test_text_and_empty() {
        let node = sample();
        assert_eq!(node.text("a,b"), "a,b");
        assert_eq!(node.children[1].text("a,b"), ",");
        assert!(!node.children[3].is_empty());
        assert!(leaf(None, 0, 0, Outcome::Success).is_empty());
    }
}
