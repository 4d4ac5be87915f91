//! Structural combinators: sequence, choice, repetition, rename, full anchor.

use super::Quantifier;
use crate::cursor::Cursor;
use crate::errors::PegResult;
use crate::node::{Kind, Node, Outcome};

// ============================================================================
// SEQUENCE
// ============================================================================

/// Runs `rules` in order and stops at the first one that does not succeed.
///
/// A reference followed by `"?"`, `"*"` or `"+"` runs as a [`rep`] whose
/// children are spliced into the sequence's own child list, so a sequence
/// always exposes a flat list. An empty sequence fails.
pub fn seq(name: Option<&str>, cursor: &mut Cursor<'_>, rules: &[&str]) -> PegResult<Node> {
    let mut attempt = cursor.attempt();
    let mut node = attempt.node(name, Kind::Sequence);
    let mut last = None;

    let mut refs = rules.iter().copied().peekable();
    while let Some(rule) = refs.next() {
        let quantifier = refs.peek().and_then(|next| Quantifier::parse(next));
        let outcome = match quantifier {
            Some(q) => {
                refs.next();
                let (min, max) = q.bounds();
                let repeated = rep(None, &mut attempt, rule, min, max)?;
                node.children.extend(repeated.children);
                repeated.outcome
            }
            None => {
                let child = attempt.invoke(rule)?;
                let outcome = child.outcome;
                node.children.push(child);
                outcome
            }
        };
        last = Some(outcome);
        if !outcome.is_success() {
            break;
        }
    }

    match last {
        Some(Outcome::Success) => {
            node.outcome = Outcome::Success;
            node.length = attempt.consumed();
        }
        Some(Outcome::Error) => node.outcome = Outcome::Error,
        _ => {}
    }
    Ok(attempt.conclude(node))
}

// ============================================================================
// CHOICE
// ============================================================================

/// Ordered choice: the first alternative that succeeds wins and the rest are
/// never tried.
pub fn alt(name: Option<&str>, cursor: &mut Cursor<'_>, rules: &[&str]) -> PegResult<Node> {
    choose(name, cursor, rules, false)
}

/// Greedy choice: every alternative is tried and the longest success wins.
/// On equal lengths the later alternative is kept. Losing alternatives stay
/// in the child list marked `Fail`.
pub fn altg(name: Option<&str>, cursor: &mut Cursor<'_>, rules: &[&str]) -> PegResult<Node> {
    choose(name, cursor, rules, true)
}

fn choose(name: Option<&str>, cursor: &mut Cursor<'_>, rules: &[&str], greedy: bool) -> PegResult<Node> {
    let kind = if greedy { Kind::GreedyChoice } else { Kind::Choice };
    let mut attempt = cursor.attempt();
    let mut node = attempt.node(name, kind);
    let mut winner: Option<usize> = None;

    for &rule in rules {
        let mut child = attempt.invoke(rule)?;
        attempt.rewind();

        if child.outcome.is_error() {
            node.children.push(child);
            node.outcome = Outcome::Error;
            return Ok(attempt.conclude(node));
        }

        let index = node.children.len();
        if greedy {
            let best = winner.map(|w| node.children[w].length);
            if child.is_success() && best.map_or(true, |len| child.length >= len) {
                if let Some(w) = winner {
                    node.children[w].outcome = Outcome::Fail;
                }
                winner = Some(index);
            } else {
                child.outcome = Outcome::Fail;
            }
            node.children.push(child);
        } else {
            let success = child.is_success();
            node.children.push(child);
            if success {
                winner = Some(index);
                break;
            }
        }
    }

    if let Some(w) = winner {
        let length = node.children[w].length;
        node.outcome = Outcome::Success;
        node.length = length;
        attempt.settle(length);
    }

    attempt.prune(&mut node);
    Ok(attempt.conclude(node))
}

// ============================================================================
// REPETITION
// ============================================================================

/// Runs `rule` repeatedly, between `min` and `max` times (`max == 0` is
/// unbounded).
///
/// Stops at the first failure, at the first zero-length success (which still
/// counts), or once `max` successes are reached. The terminating failure is
/// kept as a child unless pruned.
pub fn rep(name: Option<&str>, cursor: &mut Cursor<'_>, rule: &str, min: usize, max: usize) -> PegResult<Node> {
    let max = (max > 0).then_some(max);
    let rule = cursor.grammar().lookup(rule)?;
    let mut attempt = cursor.attempt();
    let mut node = attempt.node(name, Kind::Repetition);
    let mut count = 0;

    loop {
        let child = attempt.invoke_id(rule)?;
        let (outcome, length) = (child.outcome, child.length);
        node.children.push(child);
        if outcome.is_error() {
            node.outcome = Outcome::Error;
            return Ok(attempt.conclude(node));
        }
        if !outcome.is_success() {
            break;
        }
        count += 1;
        if length == 0 || max == Some(count) {
            break;
        }
    }

    if count >= min && max.map_or(true, |m| count <= m) {
        node.outcome = Outcome::Success;
        node.length = attempt.consumed();
    }

    attempt.prune(&mut node);
    Ok(attempt.conclude(node))
}

// ============================================================================
// RENAME AND FULL ANCHOR
// ============================================================================

/// Runs `rule` and relabels its node.
pub fn ren(name: Option<&str>, cursor: &mut Cursor<'_>, rule: &str) -> PegResult<Node> {
    let mut node = cursor.invoke(rule)?;
    node.name = name.map(str::to_string);
    Ok(node)
}

/// Succeeds only if `rule` succeeds and consumes everything from here to the
/// end of the input.
pub fn all(name: Option<&str>, cursor: &mut Cursor<'_>, rule: &str) -> PegResult<Node> {
    let mut attempt = cursor.attempt();
    let remaining = attempt.remaining();
    let mut node = attempt.node(name, Kind::FullAnchor);

    let child = attempt.invoke(rule)?;
    match child.outcome {
        Outcome::Error => node.outcome = Outcome::Error,
        Outcome::Success if child.length == remaining => {
            node.outcome = Outcome::Success;
            node.length = child.length;
        }
        _ => {}
    }
    node.children.push(child);
    Ok(attempt.conclude(node))
}
