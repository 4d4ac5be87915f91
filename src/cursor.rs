//! The input cursor.
//!
//! A [`Cursor`] is created once per parse and threaded by `&mut` through every
//! combinator. Combinators never copy it. Whenever a combinator may fail it
//! takes an [`Attempt`], which remembers the entry position and puts the
//! cursor back there unless the attempt concludes with a success.

use std::ops::{Deref, DerefMut};

use log::trace;

use crate::combinators::Pattern;
use crate::errors::PegResult;
use crate::grammar::{Grammar, RuleId};
use crate::node::{Kind, Node};
use crate::options::ParseOptions;

// ============================================================================
// CURSOR
// ============================================================================

pub struct Cursor<'a> {
    grammar: &'a Grammar,
    text: &'a str,
    position: usize,
    options: ParseOptions,
}

impl<'a> Cursor<'a> {
    pub fn new(grammar: &'a Grammar, text: &'a str, options: ParseOptions) -> Self {
        Self {
            grammar,
            text,
            position: 0,
            options,
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn grammar(&self) -> &'a Grammar {
        self.grammar
    }

    /// Bytes left between the position and the end of the input.
    pub fn remaining(&self) -> usize {
        self.text.len() - self.position
    }

    /// Moves forward by `length` bytes, stopping at the end of the input.
    /// A target inside a multi-byte character backs off to its first byte.
    pub fn advance(&mut self, length: usize) {
        let mut target = (self.position + length).min(self.text.len());
        while !self.text.is_char_boundary(target) {
            target -= 1;
        }
        self.position = target;
    }

    /// Length of `literal` if the input continues with it here.
    pub fn attempt_literal(&self, literal: &str) -> Option<usize> {
        self.text[self.position..]
            .starts_with(literal)
            .then_some(literal.len())
    }

    /// Length of the anchored match of `pattern` here. Zero-length matches count.
    pub fn attempt_pattern(&self, pattern: &Pattern) -> Option<usize> {
        pattern.match_len(&self.text[self.position..])
    }

    /// Up to `length` bytes from the position, or the rest of the input when
    /// `length` is `None`. Never splits a character.
    pub fn peek(&self, length: Option<usize>) -> &'a str {
        let rest = &self.text[self.position..];
        let Some(length) = length else {
            return rest;
        };
        let mut end = length.min(rest.len());
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        &rest[..end]
    }

    /// Resolves `rule` through the grammar's rule table and runs it here.
    pub fn invoke(&mut self, rule: &str) -> PegResult<Node> {
        let id = self.grammar.lookup(rule)?;
        self.invoke_id(id)
    }

    /// Runs an already resolved rule here.
    pub fn invoke_id(&mut self, id: RuleId) -> PegResult<Node> {
        let grammar = self.grammar;
        let rule = grammar.name(id);
        trace!("enter {rule} at {}", self.position);
        let node = grammar.body(id)(self)?;
        trace!(
            "leave {rule} at {} -> {:?} ({} bytes)",
            self.position,
            node.outcome,
            node.length
        );
        Ok(node)
    }

    /// Opens a backtracking scope at the current position.
    pub fn attempt(&mut self) -> Attempt<'_, 'a> {
        let start = self.position;
        Attempt {
            cursor: self,
            start,
            committed: false,
        }
    }
}

// ============================================================================
// BACKTRACKING GUARD
// ============================================================================

/// Scoped snapshot of the cursor position.
///
/// Dropping an attempt that was not concluded with a success restores the
/// position it was opened at, including on early `?` returns.
pub struct Attempt<'c, 'a> {
    cursor: &'c mut Cursor<'a>,
    start: usize,
    committed: bool,
}

impl<'c, 'a> Attempt<'c, 'a> {
    pub fn start(&self) -> usize {
        self.start
    }

    /// Bytes consumed since the attempt opened.
    pub fn consumed(&self) -> usize {
        self.cursor.position - self.start
    }

    /// A fresh `Fail` node anchored at the attempt's start.
    pub fn node(&self, name: Option<&str>, kind: Kind) -> Node {
        Node::new(name, kind, self.start)
    }

    /// Back to the start without closing the attempt.
    pub fn rewind(&mut self) {
        self.cursor.position = self.start;
    }

    /// Places the cursor `length` bytes after the start.
    pub fn settle(&mut self, length: usize) {
        self.cursor.position = self.start + length;
    }

    /// Prunes `node` when the parse asks for it.
    pub fn prune(&self, node: &mut Node) {
        if self.cursor.options.prune {
            node.prune();
        }
    }

    /// Closes the attempt: a successful node keeps the cursor where it is,
    /// anything else sends it back to the start.
    pub fn conclude(mut self, node: Node) -> Node {
        self.committed = node.is_success();
        node
    }
}

impl<'a> Deref for Attempt<'_, 'a> {
    type Target = Cursor<'a>;

    fn deref(&self) -> &Self::Target {
        self.cursor
    }
}

impl<'a> DerefMut for Attempt<'_, 'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.cursor
    }
}

impl Drop for Attempt<'_, '_> {
    fn drop(&mut self) {
        if !self.committed {
            self.cursor.position = self.start;
        }
    }
}
