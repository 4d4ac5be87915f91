//! pegkit Error Handling
//!
//! Ordinary parse failure is never an error here: a rule that does not match
//! returns a node with [`Outcome::Fail`](crate::Outcome::Fail) and the cursor
//! backtracks. `PegError` covers the two things that are not backtrackable:
//! grammar-authoring faults (unknown rule, lone quantifier, bad pattern) and
//! parses aborted by a node carrying [`Outcome::Error`](crate::Outcome::Error).

use std::sync::Arc;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Shorthand used by every combinator and rule body.
pub type PegResult<T> = Result<T, PegError>;

/// The single error type of the engine.
#[derive(Debug, Error, Diagnostic)]
pub enum PegError {
    /// A rule reference that is not registered in the grammar.
    #[error("unknown rule '{name}'")]
    #[diagnostic(
        code(pegkit::unknown_rule),
        help("register the rule with GrammarBuilder::rule before parsing")
    )]
    UnknownRule { name: String },

    /// A quantifier token (`?`, `*`, `+`) used anywhere but right after a
    /// reference inside `seq`.
    #[error("lone quantifier '{token}'")]
    #[diagnostic(
        code(pegkit::lone_quantifier),
        help("quantifiers only apply to the reference preceding them in a seq")
    )]
    LoneQuantifier { token: String },

    #[error("invalid pattern /{pattern}/")]
    #[diagnostic(code(pegkit::invalid_pattern))]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("rule '{name}' is defined more than once")]
    #[diagnostic(code(pegkit::duplicate_rule))]
    DuplicateRule { name: String },

    #[error("grammar has no root rule")]
    #[diagnostic(
        code(pegkit::missing_root),
        help("designate the entry rule with GrammarBuilder::root")
    )]
    MissingRoot,

    /// A custom matcher produced an `Error` node; the parse stopped there.
    #[error("parse aborted in rule '{rule}' at offset {offset}")]
    #[diagnostic(code(pegkit::aborted))]
    Aborted {
        rule: String,
        offset: usize,
        #[source_code]
        src: Arc<NamedSource<String>>,
        #[label("aborted here")]
        span: SourceSpan,
    },

    /// A rewrite transform could not turn a node into a value.
    #[error("cannot rewrite '{rule}': {message}")]
    #[diagnostic(code(pegkit::rewrite))]
    Rewrite { rule: String, message: String },

    #[error("failed to load parse options: {0}")]
    #[diagnostic(code(pegkit::config))]
    Config(String),
}

// ============================================================================
// CONSTRUCTION HELPERS
// ============================================================================

impl PegError {
    pub fn unknown_rule(name: impl Into<String>) -> Self {
        PegError::UnknownRule { name: name.into() }
    }

    pub fn lone_quantifier(token: impl Into<String>) -> Self {
        PegError::LoneQuantifier {
            token: token.into(),
        }
    }

    pub fn rewrite(rule: impl Into<String>, message: impl Into<String>) -> Self {
        PegError::Rewrite {
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// Builds an `Aborted` diagnostic labelling `length` bytes at `offset`.
    pub fn aborted(rule: Option<&str>, offset: usize, length: usize, source: &str) -> Self {
        // Zero-width labels render poorly; point at one column instead.
        let len = if length == 0 && offset < source.len() { 1 } else { length };
        PegError::Aborted {
            rule: rule.unwrap_or("_").to_string(),
            offset,
            src: Arc::new(NamedSource::new("input", source.to_string())),
            span: (offset, len).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Report;

    #[test]
    fn test_aborted_report_labels_offset() {
        let err = PegError::aborted(Some("bang"), 2, 0, "ab!!");
        assert_eq!(err.to_string(), "parse aborted in rule 'bang' at offset 2");
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("aborted here"));
    }

    #[test]
    fn test_unknown_rule_message() {
        let err = PegError::unknown_rule("nope");
        assert_eq!(err.to_string(), "unknown rule 'nope'");
    }
}
