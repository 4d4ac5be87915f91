//! Terminal matchers.

use regex::Regex;

use crate::cursor::Cursor;
use crate::errors::{PegError, PegResult};
use crate::node::{Kind, Node, Outcome};

/// A regular expression compiled to match only at the cursor.
///
/// Compile patterns once, when the grammar is built, and move them into the
/// rule closures that use them.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> PegResult<Self> {
        let regex = Regex::new(&format!(r"\A(?:{source})")).map_err(|e| {
            PegError::InvalidPattern {
                pattern: source.to_string(),
                source: Box::new(e),
            }
        })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Length of the match at the very start of `haystack`.
    pub(crate) fn match_len(&self, haystack: &str) -> Option<usize> {
        self.regex.find(haystack).map(|m| m.end())
    }
}

/// Matches `text` exactly at the cursor.
pub fn literal(name: Option<&str>, cursor: &mut Cursor<'_>, text: &str) -> PegResult<Node> {
    let found = cursor.attempt_literal(text);
    Ok(terminal(name, cursor, Kind::Literal, found))
}

/// Matches `pattern` anchored at the cursor.
pub fn pattern(name: Option<&str>, cursor: &mut Cursor<'_>, pattern: &Pattern) -> PegResult<Node> {
    let found = cursor.attempt_pattern(pattern);
    Ok(terminal(name, cursor, Kind::Pattern, found))
}

fn terminal(name: Option<&str>, cursor: &mut Cursor<'_>, kind: Kind, found: Option<usize>) -> Node {
    let mut node = Node::begin(name, kind, cursor);
    if let Some(length) = found {
        node.outcome = Outcome::Success;
        node.length = length;
        cursor.advance(length);
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Grammar, ParseOptions};

    fn grammar() -> Grammar {
        Grammar::builder()
            .rule("x", |c| literal(None, c, "x"))
            .root("x")
            .build()
            .unwrap()
    }

    #[test]
    fn test_literal_hit_and_miss() {
        let g = grammar();
        let mut c = g.cursor("xy", ParseOptions::default());
        let hit = literal(Some("x"), &mut c, "x").unwrap();
        assert_eq!((hit.outcome, hit.offset, hit.length), (Outcome::Success, 0, 1));
        assert_eq!(c.position(), 1);

        let miss = literal(None, &mut c, "x").unwrap();
        assert_eq!((miss.outcome, miss.offset, miss.length), (Outcome::Fail, 1, 0));
        assert_eq!(c.position(), 1);
        assert_eq!(miss.kind, Kind::Literal);
    }

    #[test]
    fn test_pattern_zero_length_success() {
        let g = grammar();
        let mut c = g.cursor("abc", ParseOptions::default());
        let spaces = Pattern::new(" *").unwrap();
        let node = pattern(None, &mut c, &spaces).unwrap();
        assert!(node.is_empty());
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn test_pattern_alternation_stays_anchored() {
        let g = grammar();
        let mut c = g.cursor("ba", ParseOptions::default());
        // Without the group, `a|b` would anchor only the first branch.
        let ab = Pattern::new("a|b").unwrap();
        let node = pattern(None, &mut c, &ab).unwrap();
        assert_eq!(node.length, 1);
        assert_eq!(node.text("ba"), "b");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Pattern::new("([a-z]").unwrap_err();
        assert!(matches!(err, PegError::InvalidPattern { ref pattern, .. } if pattern == "([a-z]"));
    }
}
