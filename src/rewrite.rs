//! # Rewrite Dispatch
//!
//! A [`Rewriter`] turns a parse tree into an application value. It holds one
//! transform per node name. Dispatching a node runs the transform registered
//! for its name; a node without one is skipped in favour of its first child
//! that matched something or carries a name, which walks through anonymous
//! punctuation and wrapper nodes on its own.

use std::fmt;
use std::sync::Arc;

use im::HashMap;

use crate::errors::{PegError, PegResult};
use crate::node::Node;

// ============================================================================
// CORE TYPES
// ============================================================================

/// A transform: builds a value from a node, recursing through `cx` as needed.
pub type TransformFn<T> = Arc<dyn Fn(&RewriteCx<'_, T>, &Node) -> PegResult<T> + Send + Sync>;

/// Name-indexed registry of transforms.
pub struct Rewriter<T> {
    transforms: HashMap<String, TransformFn<T>>,
}

/// What a transform sees besides its node: the source text and the rewriter,
/// for recursing into children.
pub struct RewriteCx<'r, T> {
    rewriter: &'r Rewriter<T>,
    source: &'r str,
}

// ============================================================================
// REGISTRY
// ============================================================================

impl<T> Default for Rewriter<T> {
    fn default() -> Self {
        Self {
            transforms: HashMap::new(),
        }
    }
}

impl<T> Clone for Rewriter<T> {
    fn clone(&self) -> Self {
        Self {
            transforms: self.transforms.clone(),
        }
    }
}

impl<T> fmt::Debug for Rewriter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rewriter")
            .field("transforms", &self.names())
            .finish()
    }
}

impl<T> Rewriter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the transform for nodes named `name`.
    pub fn on<F>(mut self, name: &str, transform: F) -> Self
    where
        F: Fn(&RewriteCx<'_, T>, &Node) -> PegResult<T> + Send + Sync + 'static,
    {
        self.transforms.insert(name.to_string(), Arc::new(transform));
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.transforms.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.transforms.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// True when no transform is registered; the driver then returns raw trees.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Rewrites `node`, parsed from `source`.
    pub fn rewrite(&self, node: &Node, source: &str) -> PegResult<Option<T>> {
        RewriteCx {
            rewriter: self,
            source,
        }
        .rewrite(node)
    }
}

// ============================================================================
// DISPATCH
// ============================================================================

impl<'r, T> RewriteCx<'r, T> {
    pub fn source(&self) -> &'r str {
        self.source
    }

    /// The text `node` matched.
    pub fn text(&self, node: &Node) -> &'r str {
        node.text(self.source)
    }

    /// Dispatches on the node's name, falling back to the first meaningful
    /// child. `None` when the fallback finds no such child.
    pub fn rewrite(&self, node: &Node) -> PegResult<Option<T>> {
        let transform = node
            .name
            .as_deref()
            .and_then(|name| self.rewriter.transforms.get(name));
        if let Some(transform) = transform {
            return transform(self, node).map(Some);
        }
        match node
            .children
            .iter()
            .find(|c| c.length > 0 || c.name.is_some())
        {
            Some(child) => self.rewrite(child),
            None => Ok(None),
        }
    }

    /// Like [`rewrite`](Self::rewrite) but treats "nothing to rewrite" as an error.
    pub fn value(&self, node: &Node) -> PegResult<T> {
        self.rewrite(node)?.ok_or_else(|| {
            PegError::rewrite(
                node.name.as_deref().unwrap_or("_"),
                format!("nothing to rewrite at offset {}", node.offset),
            )
        })
    }

    /// Rewrites every child named `name`, in order.
    pub fn values_of(&self, node: &Node, name: &str) -> PegResult<Vec<T>> {
        node.children
            .iter()
            .filter(|c| c.name_is(name))
            .map(|c| self.value(c))
            .collect()
    }
}
