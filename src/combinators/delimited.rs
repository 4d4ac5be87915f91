//! Delimited lists: `start element (separator element)* end`.

use crate::cursor::Cursor;
use crate::errors::PegResult;
use crate::node::{Kind, Node, Outcome};

/// Parses an optional `start`, a `separator`-delimited run of `element`, then
/// an optional `end`.
///
/// Every separator and element actually attempted is kept as a child, except
/// when an empty separator is followed by a failed or empty element: that
/// last pair is dropped and the loop ends, so epsilon separators cannot spin.
/// A list with no element at all still succeeds if `start` and `end` match.
///
/// # Example
/// ```rust
/// use pegkit::{eseq, literal, pattern, Grammar, ParseOptions, Pattern};
/// let letter = Pattern::new("[a-z]").unwrap();
/// let grammar = Grammar::builder()
///     .rule("lt", |c| literal(None, c, "<"))
///     .rule("gt", |c| literal(None, c, ">"))
///     .rule("com", |c| literal(None, c, ","))
///     .rule("cha", move |c| pattern(None, c, &letter))
///     .rule("list", |c| eseq(Some("list"), c, Some("lt"), "cha", "com", Some("gt")))
///     .root("list")
///     .build()
///     .unwrap();
/// let tree = grammar.parse("<a,b>", ParseOptions::default()).unwrap().unwrap();
/// assert_eq!(tree.odd_children().len(), 2);
/// ```
pub fn eseq(
    name: Option<&str>,
    cursor: &mut Cursor<'_>,
    start: Option<&str>,
    element: &str,
    separator: &str,
    end: Option<&str>,
) -> PegResult<Node> {
    delimited(name, cursor, start, element, separator, end, Kind::DelimitedSequence)
}

/// `element (separator element)*` with at least one element.
pub fn jseq(name: Option<&str>, cursor: &mut Cursor<'_>, element: &str, separator: &str) -> PegResult<Node> {
    delimited(name, cursor, None, element, separator, None, Kind::JoinedSequence)
}

fn delimited(
    name: Option<&str>,
    cursor: &mut Cursor<'_>,
    start: Option<&str>,
    element: &str,
    separator: &str,
    end: Option<&str>,
    kind: Kind,
) -> PegResult<Node> {
    let joined = kind == Kind::JoinedSequence;
    let grammar = cursor.grammar();
    let (element, separator) = (grammar.lookup(element)?, grammar.lookup(separator)?);
    let mut attempt = cursor.attempt();
    let mut node = attempt.node(name, kind);
    let mut outcome = Outcome::Success;

    if let Some(start) = start {
        let child = attempt.invoke(start)?;
        outcome = child.outcome;
        node.children.push(child);
    }

    if outcome.is_success() {
        let mut elements = 0;
        loop {
            let sep = if elements > 0 {
                Some(attempt.invoke_id(separator)?)
            } else {
                None
            };
            let elt = match &sep {
                Some(s) if !s.is_success() => None,
                _ => Some(attempt.invoke_id(element)?),
            };

            if let (Some(s), Some(e)) = (&sep, &elt) {
                if s.is_empty() && (e.outcome == Outcome::Fail || e.is_empty()) {
                    break;
                }
            }

            let elt_outcome = elt.as_ref().map(|e| e.outcome);
            let sep_outcome = sep.as_ref().map(|s| s.outcome);
            node.children.extend(sep);
            node.children.extend(elt);

            if sep_outcome == Some(Outcome::Error) || elt_outcome == Some(Outcome::Error) {
                outcome = Outcome::Error;
                break;
            }
            if elt_outcome != Some(Outcome::Success) {
                break;
            }
            elements += 1;
        }

        if joined && elements == 0 && outcome.is_success() {
            outcome = Outcome::Fail;
        }
    }

    if let (Outcome::Success, Some(end)) = (outcome, end) {
        let child = attempt.invoke(end)?;
        outcome = child.outcome;
        node.children.push(child);
    }

    node.outcome = outcome;
    if outcome.is_success() {
        node.length = attempt.consumed();
    }

    attempt.prune(&mut node);
    Ok(attempt.conclude(node))
}
