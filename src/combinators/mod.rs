//! # Combinators
//!
//! Every combinator has the same call shape: an optional node name, the
//! cursor, then the rule references (or literal/pattern) it composes. It
//! returns the node it built; `Err` is reserved for grammar faults.
//!
//! ## Module Structure
//!
//! - **`terminals`**: `literal`, `pattern` and the compiled [`Pattern`]
//! - **`structure`**: `seq`, `alt`, `altg`, `rep`, `ren`, `all`
//! - **`delimited`**: `eseq`, `jseq`
//!
//! ## Backtracking
//!
//! A combinator that returns anything but a success leaves the cursor where
//! it found it. Each one opens an [`Attempt`](crate::Attempt) on entry and
//! lets it restore the position on every non-successful exit.

pub mod delimited;
pub mod structure;
pub mod terminals;

pub use delimited::{eseq, jseq};
pub use structure::{all, alt, altg, rep, ren, seq};
pub use terminals::{literal, pattern, Pattern};

// ============================================================================
// QUANTIFIERS
// ============================================================================

/// Suffix tokens understood by [`seq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// `?`
    Optional,
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
}

impl Quantifier {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "?" => Some(Quantifier::Optional),
            "*" => Some(Quantifier::ZeroOrMore),
            "+" => Some(Quantifier::OneOrMore),
            _ => None,
        }
    }

    /// `(min, max)` for [`rep`]; a max of zero is unbounded.
    pub fn bounds(self) -> (usize, usize) {
        match self {
            Quantifier::Optional => (0, 1),
            Quantifier::ZeroOrMore => (0, 0),
            Quantifier::OneOrMore => (1, 0),
        }
    }
}
