//! The parse entry point.
//!
//! `parse` runs the grammar's root rule over a whole input, wrapped in the
//! full-input anchor unless told otherwise, and hands back the raw tree.
//! `parse_with` additionally routes a successful tree through a
//! [`Rewriter`].

use log::debug;

use crate::combinators::all;
use crate::cursor::Cursor;
use crate::errors::{PegError, PegResult};
use crate::grammar::Grammar;
use crate::node::{Kind, Node, Outcome};
use crate::options::ParseOptions;
use crate::rewrite::Rewriter;

/// What `parse_with` produced: the rewritten value, or the tree itself when
/// rewriting was off or nothing was registered to rewrite with.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed<T> {
    Tree(Node),
    Value(T),
}

impl<T> Parsed<T> {
    pub fn tree(&self) -> Option<&Node> {
        match self {
            Parsed::Tree(node) => Some(node),
            Parsed::Value(_) => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Parsed::Value(value) => Some(value),
            Parsed::Tree(_) => None,
        }
    }
}

impl Grammar {
    /// Parses `text` from its root rule.
    ///
    /// Returns `Ok(None)` when pruning is on and the parse did not succeed.
    /// With pruning off, a failed tree is returned as-is for inspection. A
    /// tree whose root carries `Outcome::Error` becomes
    /// [`PegError::Aborted`].
    pub fn parse(&self, text: &str, options: ParseOptions) -> PegResult<Option<Node>> {
        let options = options.effective();
        debug!("parsing {} bytes from '{}' with {:?}", text.len(), self.root(), options);

        let mut cursor = Cursor::new(self, text, options);
        let tree = if options.all {
            all(None, &mut cursor, self.root())?
        } else {
            cursor.invoke_id(self.root_id())?
        };
        debug!("root -> {:?}, cursor at {}", tree.outcome, cursor.position());

        if tree.outcome == Outcome::Error {
            let at = tree.find_error().unwrap_or(&tree);
            return Err(PegError::aborted(at.name.as_deref(), at.offset, at.length, text));
        }
        if options.prune && !tree.is_success() {
            return Ok(None);
        }

        Ok(Some(if options.all { unwrap_anchor(tree) } else { tree }))
    }

    /// Parses `text` and rewrites the tree with `rewriter`.
    ///
    /// Rewriting happens when the options allow it and the rewriter has at
    /// least one transform registered; otherwise the tree comes back as
    /// [`Parsed::Tree`], as it does when the rewrite finds nothing to
    /// produce. `Ok(None)` always means the input did not parse.
    pub fn parse_with<T>(
        &self,
        rewriter: &Rewriter<T>,
        text: &str,
        options: ParseOptions,
    ) -> PegResult<Option<Parsed<T>>> {
        let Some(tree) = self.parse(text, options)? else {
            return Ok(None);
        };
        if !options.effective().rewrite || rewriter.is_empty() {
            return Ok(Some(Parsed::Tree(tree)));
        }
        Ok(Some(match rewriter.rewrite(&tree, text)? {
            Some(value) => Parsed::Value(value),
            None => Parsed::Tree(tree),
        }))
    }
}

fn unwrap_anchor(tree: Node) -> Node {
    if tree.kind != Kind::FullAnchor {
        return tree;
    }
    let Node { children, .. } = tree;
    match children.into_iter().next() {
        Some(root) => root,
        None => Node::new(None, Kind::FullAnchor, 0),
    }
}
