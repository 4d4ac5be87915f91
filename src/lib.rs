//! # pegkit
//!
//! A small Parsing Expression Grammar engine. Grammars are tables of named
//! rules whose bodies call the combinators in [`combinators`]; parsing is
//! backtracking recursive descent over the whole input and yields an ordered
//! tree of [`Node`]s, which a [`Rewriter`] can turn into application values.
//!
//! ```rust
//! use pegkit::{jseq, literal, pattern, Grammar, ParseOptions, Pattern};
//! let word = Pattern::new("[a-z]+").unwrap();
//! let grammar = Grammar::builder()
//!     .rule("word", move |c| pattern(Some("word"), c, &word))
//!     .rule("comma", |c| literal(None, c, ","))
//!     .rule("words", |c| jseq(Some("words"), c, "word", "comma"))
//!     .root("words")
//!     .build()
//!     .unwrap();
//! let tree = grammar.parse("ab,cd", ParseOptions::default()).unwrap().unwrap();
//! assert_eq!(tree.gather("word").len(), 2);
//! ```

pub use crate::combinators::{
    all, alt, altg, eseq, jseq, literal, pattern, rep, ren, seq, Pattern, Quantifier,
};
pub use crate::cursor::{Attempt, Cursor};
pub use crate::driver::Parsed;
pub use crate::errors::{PegError, PegResult};
pub use crate::grammar::{Grammar, GrammarBuilder, RuleFn, RuleId};
pub use crate::node::{Kind, Node, Outcome};
pub use crate::options::ParseOptions;
pub use crate::rewrite::{RewriteCx, Rewriter, TransformFn};

pub mod cli;
pub mod combinators;
pub mod cursor;
pub mod driver;
pub mod errors;
pub mod grammar;
pub mod node;
pub mod options;
pub mod render;
pub mod rewrite;
pub mod samples;
