//! Example grammars built on the combinators. They are not part of the engine;
//! the command line and the tests use them.

pub mod xel;
