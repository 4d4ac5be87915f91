//! Defines the command-line arguments and subcommands for the pegkit CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "pegkit",
    version,
    about = "Parse function-call expressions with the pegkit sample grammar."
)]
pub struct PegkitArgs {
    /// Log to stderr: -v for the driver, -vv for every rule entered and left.
    /// `RUST_LOG` takes precedence.
    #[arg(long, short, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse an expression and print its value or its parse tree.
    Parse {
        /// The expression to parse; read from stdin when omitted.
        input: Option<String>,
        /// YAML or JSON file with parse options (debug, all, prune, rewrite).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Debug level: 1 keeps the raw tree, 2 also drops the full-input
        /// anchor, 3 also keeps failed branches.
        #[arg(long, short)]
        debug: Option<u8>,
        /// Do not require the whole input to be consumed.
        #[arg(long)]
        no_all: bool,
        /// Keep failed branches in the tree.
        #[arg(long)]
        no_prune: bool,
        /// Print the tree instead of the rewritten value.
        #[arg(long)]
        no_rewrite: bool,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
        color: ColorMode,
    },
    /// List the rules of the sample grammar.
    Rules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Indented tree listing, or the value in source form.
    Text,
    /// Nested `[name, result, offset, length, kind, tail]` arrays.
    Array,
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}
