//! A tiny spreadsheet-style expression language: integers and upper-case
//! function calls such as `SUM(1,MUL(4,5))`.

use std::fmt;

use serde::Serialize;

use crate::combinators::{alt, eseq, literal, pattern, seq, Pattern};
use crate::errors::{PegError, PegResult};
use crate::grammar::Grammar;
use crate::rewrite::Rewriter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Xel {
    Num(i64),
    Call { name: String, args: Vec<Xel> },
}

impl fmt::Display for Xel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Xel::Num(n) => write!(f, "{n}"),
            Xel::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// `exp = fun | num`, `fun = funame args`, `args = '(' exp (',' exp)* ')'`.
pub fn grammar() -> PegResult<Grammar> {
    let num = Pattern::new("-?[0-9]+")?;
    let funame = Pattern::new("[A-Z][A-Z0-9]*")?;
    Grammar::builder()
        .rule("pa", |c| literal(None, c, "("))
        .rule("pz", |c| literal(None, c, ")"))
        .rule("com", |c| literal(None, c, ","))
        .rule("num", move |c| pattern(Some("num"), c, &num))
        .rule("args", |c| eseq(Some("args"), c, Some("pa"), "exp", "com", Some("pz")))
        .rule("funame", move |c| pattern(Some("funame"), c, &funame))
        .rule("fun", |c| seq(Some("fun"), c, &["funame", "args"]))
        .rule("exp", |c| alt(Some("exp"), c, &["fun", "num"]))
        .root("exp")
        .build()
}

pub fn rewriter() -> Rewriter<Xel> {
    Rewriter::new()
        .on("num", |cx, node| {
            cx.text(node)
                .parse::<i64>()
                .map(Xel::Num)
                .map_err(|e| PegError::rewrite("num", e.to_string()))
        })
        .on("fun", |cx, node| {
            let name = node
                .lookup("funame")
                .map(|n| cx.text(n).to_string())
                .ok_or_else(|| PegError::rewrite("fun", "missing function name"))?;
            let args = match node.lookup("args") {
                Some(args) => cx.values_of(args, "exp")?,
                None => Vec::new(),
            };
            Ok(Xel::Call { name, args })
        })
}
