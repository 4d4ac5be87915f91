//! Parse configuration.
//!
//! The driver recognises four options. `debug` is a shortcut that switches the
//! other three off, one per level, so higher levels expose more of the raw
//! tree: level 1 skips rewriting, level 2 also skips the full-input anchor,
//! level 3 also keeps failed branches.

use serde::{Deserialize, Serialize};

use crate::errors::{PegError, PegResult};

/// Options threaded through a parse inside the [`Cursor`](crate::Cursor).
///
/// # Examples
///
/// ```rust
/// use pegkit::ParseOptions;
/// let opts = ParseOptions::default().with_debug(2).effective();
/// assert!(!opts.rewrite);
/// assert!(!opts.all);
/// assert!(opts.prune);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub debug: u8,
    /// Require the root rule to consume the whole input.
    pub all: bool,
    /// Discard failed children after each pruning combinator.
    pub prune: bool,
    /// Hand successful trees to the rewriter.
    pub rewrite: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            debug: 0,
            all: true,
            prune: true,
            rewrite: true,
        }
    }
}

impl ParseOptions {
    pub fn with_debug(mut self, debug: u8) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    pub fn with_prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    pub fn with_rewrite(mut self, rewrite: bool) -> Self {
        self.rewrite = rewrite;
        self
    }

    /// Applies the `debug` relaxations on top of the explicit flags.
    pub fn effective(self) -> Self {
        Self {
            debug: self.debug,
            rewrite: self.rewrite && self.debug < 1,
            all: self.all && self.debug < 2,
            prune: self.prune && self.debug < 3,
        }
    }

    /// Reads options from YAML or JSON text; absent keys keep their defaults.
    pub fn from_yaml(text: &str) -> PegResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| PegError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_levels_relax_progressively() {
        let base = ParseOptions::default();
        assert_eq!(base.effective(), base);

        let one = base.with_debug(1).effective();
        assert!(!one.rewrite && one.all && one.prune);

        let three = base.with_debug(3).effective();
        assert!(!three.rewrite && !three.all && !three.prune);
    }

    #[test]
    fn test_explicit_flags_survive_debug_zero() {
        let opts = ParseOptions::default().with_prune(false).effective();
        assert!(!opts.prune);
        assert!(opts.all);
    }

    #[test]
    fn test_from_yaml_partial_and_json() {
        let opts = ParseOptions::from_yaml("prune: false\n").unwrap();
        assert!(!opts.prune);
        assert!(opts.all);

        let opts = ParseOptions::from_yaml(r#"{"debug": 2, "rewrite": false}"#).unwrap();
        assert_eq!(opts.debug, 2);
        assert!(!opts.rewrite);

        assert_eq!(ParseOptions::from_yaml("").unwrap(), ParseOptions::default());
        assert!(ParseOptions::from_yaml("debug: [").is_err());
    }
}
