//! Grammars: named rules and their resolution.
//!
//! A grammar is a table of rule bodies built once by [`GrammarBuilder`]. Rule
//! bodies are plain closures that call the combinators and refer to other
//! rules by name, so rules can be declared in any order and may recurse into
//! each other. A name resolves to a [`RuleId`] through the table; loops
//! resolve once and then invoke by id.
//!
//! ## Registry Invariant
//! The grammar is immutable once built. Every cursor borrows it for the length
//! of a parse; the entry rule is designated explicitly and checked by `build`.

use std::fmt;
use std::sync::Arc;

use im::HashMap;

use crate::combinators::Quantifier;
use crate::cursor::Cursor;
use crate::errors::{PegError, PegResult};
use crate::node::Node;
use crate::options::ParseOptions;

// ============================================================================
// CORE TYPES
// ============================================================================

/// A rule body: runs at the cursor and returns the node it produced.
pub type RuleFn = Arc<dyn Fn(&mut Cursor<'_>) -> PegResult<Node> + Send + Sync>;

/// Index of a rule in its grammar's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(usize);

struct Rule {
    name: String,
    body: RuleFn,
}

pub struct Grammar {
    rules: Vec<Rule>,
    index: HashMap<String, RuleId>,
    root: RuleId,
}

impl Grammar {
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::default()
    }

    /// Name of the entry rule.
    pub fn root(&self) -> &str {
        &self.rules[self.root.0].name
    }

    pub fn root_id(&self) -> RuleId {
        self.root
    }

    pub fn id(&self, name: &str) -> Option<RuleId> {
        self.index.get(name).copied()
    }

    pub fn name(&self, id: RuleId) -> &str {
        &self.rules[id.0].name
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Rule names in registration order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }

    /// A cursor at offset zero of `text`, for driving rules by hand.
    pub fn cursor<'a>(&'a self, text: &'a str, options: ParseOptions) -> Cursor<'a> {
        Cursor::new(self, text, options)
    }

    /// Resolves a rule reference once, so loops can invoke it by id.
    pub fn lookup(&self, rule: &str) -> PegResult<RuleId> {
        if Quantifier::parse(rule).is_some() {
            return Err(PegError::lone_quantifier(rule));
        }
        self.id(rule).ok_or_else(|| PegError::unknown_rule(rule))
    }

    pub(crate) fn body(&self, id: RuleId) -> &RuleFn {
        &self.rules[id.0].body
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("rules", &self.rule_names())
            .field("root", &self.root())
            .finish()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Collects rules and the root designation; all checks happen in [`build`](Self::build).
///
/// # Example
/// ```rust
/// use pegkit::{literal, seq, Grammar, ParseOptions};
/// let grammar = Grammar::builder()
///     .rule("a", |c| literal(None, c, "a"))
///     .rule("ab", |c| seq(Some("ab"), c, &["a", "b"]))
///     .rule("b", |c| literal(None, c, "b"))
///     .root("ab")
///     .build()
///     .unwrap();
/// let tree = grammar.parse("ab", ParseOptions::default()).unwrap().unwrap();
/// assert_eq!(tree.length, 2);
/// ```
#[derive(Default)]
pub struct GrammarBuilder {
    rules: Vec<Rule>,
    root: Option<String>,
}

impl GrammarBuilder {
    pub fn rule<F>(mut self, name: &str, body: F) -> Self
    where
        F: Fn(&mut Cursor<'_>) -> PegResult<Node> + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            name: name.to_string(),
            body: Arc::new(body),
        });
        self
    }

    pub fn root(mut self, name: &str) -> Self {
        self.root = Some(name.to_string());
        self
    }

    pub fn build(self) -> PegResult<Grammar> {
        let mut index = HashMap::new();
        for (i, rule) in self.rules.iter().enumerate() {
            if Quantifier::parse(&rule.name).is_some() {
                return Err(PegError::lone_quantifier(rule.name.as_str()));
            }
            if index.insert(rule.name.clone(), RuleId(i)).is_some() {
                return Err(PegError::DuplicateRule {
                    name: rule.name.clone(),
                });
            }
        }
        let root_name = self.root.ok_or(PegError::MissingRoot)?;
        let root = index
            .get(&root_name)
            .copied()
            .ok_or_else(|| PegError::unknown_rule(root_name.as_str()))?;
        Ok(Grammar {
            rules: self.rules,
            index,
            root,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::literal;

    #[test]
    fn test_build_requires_root() {
        let err = Grammar::builder()
            .rule("a", |c| literal(None, c, "a"))
            .build()
            .unwrap_err();
        assert!(matches!(err, PegError::MissingRoot));

        let err = Grammar::builder()
            .rule("a", |c| literal(None, c, "a"))
            .root("b")
            .build()
            .unwrap_err();
        assert!(matches!(err, PegError::UnknownRule { ref name } if name == "b"));
    }

    #[test]
    fn test_build_rejects_duplicates_and_quantifier_names() {
        let err = Grammar::builder()
            .rule("a", |c| literal(None, c, "a"))
            .rule("a", |c| literal(None, c, "b"))
            .root("a")
            .build()
            .unwrap_err();
        assert!(matches!(err, PegError::DuplicateRule { .. }));

        let err = Grammar::builder()
            .rule("+", |c| literal(None, c, "+"))
            .root("+")
            .build()
            .unwrap_err();
        assert!(matches!(err, PegError::LoneQuantifier { .. }));
    }

    #[test]
    fn test_table_lookup() {
        let g = Grammar::builder()
            .rule("b", |c| literal(None, c, "b"))
            .rule("a", |c| literal(None, c, "a"))
            .root("a")
            .build()
            .unwrap();
        assert_eq!(g.root(), "a");
        assert_eq!(g.rule_names(), vec!["b", "a"]);
        let id = g.id("a").unwrap();
        assert_eq!(g.name(id), "a");
        assert!(g.has_rule("b"));
        assert!(!g.has_rule("c"));
        assert_eq!(g.name(g.root_id()), "a");
    }

    #[test]
    fn test_lookup_checks_references() {
        let g = Grammar::builder()
            .rule("a", |c| literal(None, c, "a"))
            .root("a")
            .build()
            .unwrap();
        assert_eq!(g.lookup("a").unwrap(), g.root_id());
        assert!(matches!(g.lookup("b"), Err(PegError::UnknownRule { .. })));
        assert!(matches!(g.lookup("?"), Err(PegError::LoneQuantifier { .. })));
    }
}
