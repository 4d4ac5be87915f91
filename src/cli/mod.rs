//! The pegkit Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::io::{self, Read};
use std::path::Path;
use std::{fs, process};

use clap::Parser;
use log::LevelFilter;
use miette::Report;

use crate::cli::args::{ColorMode, Command, Format, PegkitArgs};
use crate::driver::Parsed;
use crate::errors::{PegError, PegResult};
use crate::options::ParseOptions;
use crate::samples::xel;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = PegkitArgs::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Command::Parse {
            input,
            config,
            debug,
            no_all,
            no_prune,
            no_rewrite,
            format,
            color,
        } => {
            let overrides = Overrides {
                debug,
                no_all,
                no_prune,
                no_rewrite,
            };
            handle_parse(input, config.as_deref(), overrides, format, color)
        }
        Command::Rules => handle_rules(),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{:?}", Report::new(e));
            process::exit(2);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .try_init();
}

struct Overrides {
    debug: Option<u8>,
    no_all: bool,
    no_prune: bool,
    no_rewrite: bool,
}

fn load_options(config: Option<&Path>, overrides: Overrides) -> PegResult<ParseOptions> {
    let mut options = match config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| PegError::Config(format!("{}: {e}", path.display())))?;
            ParseOptions::from_yaml(&text)?
        }
        None => ParseOptions::default(),
    };
    if let Some(debug) = overrides.debug {
        options.debug = debug;
    }
    if overrides.no_all {
        options.all = false;
    }
    if overrides.no_prune {
        options.prune = false;
    }
    if overrides.no_rewrite {
        options.rewrite = false;
    }
    Ok(options)
}

fn read_input(input: Option<String>) -> PegResult<String> {
    if let Some(input) = input {
        return Ok(input);
    }
    if atty::is(atty::Stream::Stdin) {
        return Err(PegError::Config("no input given".to_string()));
    }
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| PegError::Config(format!("cannot read stdin: {e}")))?;
    Ok(text.trim_end_matches(['\n', '\r']).to_string())
}

/// Handles the `parse` subcommand. `Ok(false)` means the input did not parse.
fn handle_parse(
    input: Option<String>,
    config: Option<&Path>,
    overrides: Overrides,
    format: Format,
    color: ColorMode,
) -> PegResult<bool> {
    let options = load_options(config, overrides)?;
    let source = read_input(input)?;
    let grammar = xel::grammar()?;
    let rewriter = xel::rewriter();
    let mut out = output::stdout(color);

    match grammar.parse_with(&rewriter, &source, options)? {
        Some(Parsed::Value(value)) => output::print_value(&mut out, &value, format)?,
        Some(Parsed::Tree(tree)) => output::print_tree(&mut out, &tree, &source, format)?,
        None => {
            eprintln!("no parse");
            return Ok(false);
        }
    }
    Ok(true)
}

/// Handles the `rules` subcommand.
fn handle_rules() -> PegResult<bool> {
    let grammar = xel::grammar()?;
    for name in grammar.rule_names() {
        if name == grammar.root() {
            println!("{name} (root)");
        } else {
            println!("{name}");
        }
    }
    Ok(true)
}
