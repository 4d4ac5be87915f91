//! Handles all user-facing output for the CLI.
//!
//! Trees and values are formatted here so every subcommand prints the same
//! way. Text trees colour each node's result code.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::cli::args::{ColorMode, Format};
use crate::errors::{PegError, PegResult};
use crate::node::{Node, Outcome};
use crate::render::{self, ArrayOptions};
use crate::samples::xel::Xel;

// ============================================================================
// STREAMS
// ============================================================================

pub fn stdout(mode: ColorMode) -> StandardStream {
    let choice = match mode {
        ColorMode::Auto if atty::is(atty::Stream::Stdout) => ColorChoice::Auto,
        ColorMode::Auto | ColorMode::Never => ColorChoice::Never,
        ColorMode::Always => ColorChoice::Always,
    };
    StandardStream::stdout(choice)
}

// ============================================================================
// TREES
// ============================================================================

pub fn print_tree(out: &mut impl WriteColor, tree: &Node, source: &str, format: Format) -> PegResult<()> {
    match format {
        Format::Text => write_text_tree(out, tree, source, 0).map_err(io_error),
        Format::Array => {
            let value = render::to_array(tree, source, ArrayOptions::leaves());
            writeln!(out, "{value}").map_err(io_error)
        }
        Format::Json => print_json(out, tree),
        Format::Yaml => print_yaml(out, tree),
    }
}

fn write_text_tree(out: &mut impl WriteColor, node: &Node, source: &str, depth: usize) -> io::Result<()> {
    let color = match node.outcome {
        Outcome::Success => Color::Green,
        Outcome::Fail => Color::Yellow,
        Outcome::Error => Color::Red,
    };
    let line = render::line(node, source);
    let (code, rest) = line.split_once(' ').unwrap_or((line.as_str(), ""));
    write!(out, "{}", "  ".repeat(depth))?;
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{code}")?;
    out.reset()?;
    writeln!(out, " {rest}")?;
    for child in &node.children {
        write_text_tree(out, child, source, depth + 1)?;
    }
    Ok(())
}

// ============================================================================
// VALUES
// ============================================================================

pub fn print_value(out: &mut impl WriteColor, value: &Xel, format: Format) -> PegResult<()> {
    match format {
        Format::Text | Format::Array => writeln!(out, "{value}").map_err(io_error),
        Format::Json => print_json(out, value),
        Format::Yaml => print_yaml(out, value),
    }
}

fn print_json(out: &mut impl Write, value: &impl serde::Serialize) -> PegResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| PegError::Config(e.to_string()))?;
    writeln!(out, "{text}").map_err(io_error)
}

fn print_yaml(out: &mut impl Write, value: &impl serde::Serialize) -> PegResult<()> {
    let text = serde_yaml::to_string(value).map_err(|e| PegError::Config(e.to_string()))?;
    write!(out, "{text}").map_err(io_error)
}

fn io_error(e: io::Error) -> PegError {
    PegError::Config(format!("cannot write output: {e}"))
}
