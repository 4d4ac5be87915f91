//! # pegkit Test Helpers
//!
//! Small grammars shared by the integration tests.

#![allow(dead_code)]

use pegkit::render::{self, ArrayOptions};
use pegkit::{
    alt, altg, eseq, literal, pattern, rep, seq, Cursor, Grammar, Kind, Node, Outcome, ParseOptions,
    PegResult, Pattern,
};
use serde_json::Value;

/// `<`, `>`, `,` and single lowercase letters, plus a bracketed list over them.
pub fn list_grammar() -> Grammar {
    let letter = Pattern::new("[a-z]").unwrap();
    Grammar::builder()
        .rule("lt", |c| literal(None, c, "<"))
        .rule("gt", |c| literal(None, c, ">"))
        .rule("com", |c| literal(None, c, ","))
        .rule("cha", move |c| pattern(None, c, &letter))
        .rule("list", |c| eseq(Some("list"), c, Some("lt"), "cha", "com", Some("gt")))
        .root("list")
        .build()
        .unwrap()
}

/// A grammar mixing every structural combinator, used to check invariants
/// across many inputs.
pub fn mixed_grammar() -> Grammar {
    let word = Pattern::new("[a-z]+").unwrap();
    let digits = Pattern::new("[0-9]+").unwrap();
    let blank = Pattern::new(" *").unwrap();
    Grammar::builder()
        .rule("word", move |c| pattern(Some("word"), c, &word))
        .rule("digits", move |c| pattern(Some("digits"), c, &digits))
        .rule("blank", move |c| pattern(None, c, &blank))
        .rule("ab", |c| literal(Some("ab"), c, "ab"))
        .rule("a", |c| literal(Some("a"), c, "a"))
        .rule("atom", |c| altg(Some("atom"), c, &["a", "ab", "word", "digits"]))
        .rule("item", |c| seq(Some("item"), c, &["blank", "atom", "blank"]))
        .rule("items", |c| rep(Some("items"), c, "item", 1, 0))
        .rule("pair", |c| seq(Some("pair"), c, &["word", "blank", "digits"]))
        .rule("top", |c| alt(Some("top"), c, &["pair", "items"]))
        .root("top")
        .build()
        .unwrap()
}

/// Words, commas and brackets where `!!` anywhere an element is expected
/// aborts the parse.
pub fn error_grammar() -> Grammar {
    let word = Pattern::new("[a-z]+").unwrap();
    Grammar::builder()
        .rule("word", move |c| pattern(Some("word"), c, &word))
        .rule("bang", bang)
        .rule("wb", |c| alt(Some("wb"), c, &["word", "bang"]))
        .rule("com", |c| literal(None, c, ","))
        .rule("lt", |c| literal(None, c, "<"))
        .rule("gt", |c| literal(None, c, ">"))
        .rule("wbs", |c| rep(Some("wbs"), c, "wb", 1, 0))
        .root("wbs")
        .build()
        .unwrap()
}

/// Options for driving combinators by hand without pruning.
pub fn raw() -> ParseOptions {
    ParseOptions::default().with_prune(false)
}

pub fn leaves(node: &Node, source: &str) -> Value {
    render::to_array(node, source, ArrayOptions::leaves())
}

/// Flags `!!` as an unrecoverable error and misses on anything else.
pub fn bang(c: &mut Cursor<'_>) -> PegResult<Node> {
    let mut node = Node::begin(Some("bang"), Kind::Custom("bang".into()), c);
    if c.peek(Some(2)) == "!!" {
        node.outcome = Outcome::Error;
        node.length = 2;
    }
    Ok(node)
}

/// Concatenated text of every leaf, in tree order.
pub fn leaf_text(node: &Node, source: &str) -> String {
    if node.children.is_empty() {
        return node.text(source).to_string();
    }
    node.children.iter().map(|c| leaf_text(c, source)).collect()
}
