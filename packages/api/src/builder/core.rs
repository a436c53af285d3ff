//! Core `QueryBuilder` structures and base functionality
//!
//! Contains the `QueryBuilder` struct, its state types, and the configuration
//! methods shared by every query before it is executed.

use std::fmt;

use wicker_core::config::{NegativeIndexPolicy, StreamingConfig};
use wicker_core::predicate::BasketPredicate;

/// State marker indicating no path has been given
#[derive(Debug, Clone, Copy, Default)]
pub struct PathNotSet;

/// Path text waiting to be compiled, with the predicates for its `[?]`
/// placeholders in order
#[derive(Clone)]
pub struct PathSet {
    pub(crate) text: String,
    pub(crate) predicates: Vec<BasketPredicate>,
}

impl fmt::Debug for PathSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathSet")
            .field("text", &self.text)
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

/// Fluent builder for path queries
///
/// Type parameter `S` tracks whether a path has been given:
/// - `PathNotSet`: configuration methods and `path` available
/// - `PathSet`: predicates and terminal methods available
#[derive(Debug, Clone)]
pub struct QueryBuilder<S = PathNotSet> {
    /// Query state
    pub(crate) state: S,
    /// Engine configuration
    pub(crate) config: StreamingConfig,
    /// Debug logging enabled flag
    pub(crate) debug_enabled: bool,
}

impl Default for QueryBuilder<PathNotSet> {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryBuilder<PathNotSet> {
    /// Start building a query with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: PathNotSet,
            config: StreamingConfig::default(),
            debug_enabled: false,
        }
    }

    /// Set the path text, for example `$.store.book[*].author`
    #[must_use]
    pub fn path(self, text: impl Into<String>) -> QueryBuilder<PathSet> {
        QueryBuilder {
            state: PathSet {
                text: text.into(),
                predicates: Vec::new(),
            },
            config: self.config,
            debug_enabled: self.debug_enabled,
        }
    }
}

impl QueryBuilder<PathSet> {
    /// Bind the next `[?]` placeholder of the path to `predicate`
    #[must_use]
    pub fn predicate(mut self, predicate: BasketPredicate) -> Self {
        self.state.predicates.push(predicate);
        self
    }

    /// Bind `[?]` placeholders in order
    #[must_use]
    pub fn predicates(mut self, predicates: impl IntoIterator<Item = BasketPredicate>) -> Self {
        self.state.predicates.extend(predicates);
        self
    }

    /// The path text as given
    #[must_use]
    pub fn path_text(&self) -> &str {
        &self.state.text
    }
}

impl<S> QueryBuilder<S> {
    /// Replace the whole engine configuration
    #[must_use]
    pub fn config(mut self, config: StreamingConfig) -> Self {
        self.config = config;
        self
    }

    /// Maximum nesting depth accepted from a document
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config = self.config.with_max_depth(max_depth);
        self
    }

    /// Whether multi-key and multi-index segments project in declared order
    #[must_use]
    pub fn declared_order(mut self, declared_order: bool) -> Self {
        self.config = self.config.with_declared_order(declared_order);
        self
    }

    /// How length-dependent segments are handled while streaming
    #[must_use]
    pub fn negative_indices(mut self, policy: NegativeIndexPolicy) -> Self {
        self.config = self.config.with_negative_indices(policy);
        self
    }

    /// Enable debug logging of query execution
    #[must_use]
    pub fn debug(mut self) -> Self {
        self.debug_enabled = true;
        self
    }

    /// The configuration queries from this builder run with
    #[must_use]
    pub fn streaming_config(&self) -> &StreamingConfig {
        &self.config
    }
}
