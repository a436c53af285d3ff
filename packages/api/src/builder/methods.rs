//! Terminal methods
//!
//! Compile the configured path and run it over a document, either collecting
//! matches or rewriting them.

use std::fmt;

use wicker_core::basket::Basket;
use wicker_core::config::{StreamingConfig, Validator};
use wicker_core::json::JsonTextWriter;
use wicker_core::path::Path;
use wicker_core::streaming::{EngineStats, MatchPolicy, PathMatchingWriter, Projecting, Rewriting};
use wicker_core::tree::Projector;
use wicker_core::writer::{BasketWeaver, BasketWriter};

use crate::builder::core::{PathSet, QueryBuilder};
use crate::builder::source::{DocumentSource, JsonText};

/// A validated path and configuration, ready to run any number of times
#[derive(Clone)]
pub struct Query {
    path: Path,
    config: StreamingConfig,
    debug_enabled: bool,
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("path", &self.path.to_string())
            .field("config", &self.config)
            .finish()
    }
}

impl QueryBuilder<PathSet> {
    /// Parse the path and validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the path text is malformed, the number of
    /// predicates does not match its `[?]` placeholders, or the configuration
    /// is invalid.
    pub fn compile(self) -> wicker_core::Result<Query> {
        let path = Path::parse(&self.state.text, self.state.predicates)?;
        self.config.validate()?;
        if self.debug_enabled {
            log::debug!("compiled query {path} with {:?}", self.config);
        }
        Ok(Query {
            path,
            config: self.config,
            debug_enabled: self.debug_enabled,
        })
    }

    /// Compile and collect every match in `source`
    ///
    /// # Errors
    ///
    /// See [`compile`](Self::compile) and [`Query::project`].
    pub fn project(self, source: impl DocumentSource) -> wicker_core::Result<Vec<Basket>> {
        self.compile()?.project(source)
    }

    /// Compile and collect every match in the JSON document `text`
    ///
    /// # Errors
    ///
    /// See [`compile`](Self::compile) and [`Query::project`].
    pub fn project_json(self, text: &str) -> wicker_core::Result<Vec<Basket>> {
        self.compile()?.project(JsonText(text))
    }

    /// Compile and rewrite every match in `value`
    ///
    /// # Errors
    ///
    /// See [`compile`](Self::compile) and [`Query::rewrite`].
    pub fn rewrite<F>(self, value: &Basket, transform: F) -> wicker_core::Result<Basket>
    where
        F: FnMut(Basket) -> Basket,
    {
        self.compile()?.rewrite(value, transform)
    }

    /// Compile and rewrite every match in the JSON document `text`
    ///
    /// # Errors
    ///
    /// See [`compile`](Self::compile) and [`Query::rewrite_json`].
    pub fn rewrite_json<F>(self, text: &str, transform: F) -> wicker_core::Result<String>
    where
        F: FnMut(Basket) -> Basket,
    {
        self.compile()?.rewrite_json(text, transform)
    }
}

impl Query {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn config(&self) -> &StreamingConfig {
        &self.config
    }

    fn engine<P: MatchPolicy>(&self, policy: P) -> wicker_core::Result<PathMatchingWriter<P>> {
        Ok(PathMatchingWriter::new(self.path.clone(), policy).with_config(self.config.clone())?)
    }

    fn run<P, S>(&self, operation: &'static str, policy: P, source: S) -> wicker_core::Result<P>
    where
        P: MatchPolicy,
        S: DocumentSource,
    {
        let span = tracing::debug_span!("wicker.query", operation, path = %self.path);
        let _guard = span.enter();

        let mut engine = self.engine(policy)?;
        if let Err(err) = source.feed(&mut engine) {
            tracing::debug!(error = %err, "query failed");
            return Err(err);
        }
        self.report(engine.stats());
        Ok(engine.into_policy()?)
    }

    fn report(&self, stats: &EngineStats) {
        tracing::debug!(
            events = stats.events,
            woven = stats.subtrees_woven,
            skipped = stats.subtrees_skipped,
            max_frames = stats.max_frames,
            "query complete"
        );
        if self.debug_enabled {
            log::debug!("{} {stats:?}", self.path);
        }
    }

    /// Every match in `source`
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or nests deeper than the
    /// configured limit.
    pub fn project(&self, source: impl DocumentSource) -> wicker_core::Result<Vec<Basket>> {
        self.run("project", Projecting::new(), source)
            .map(Projecting::into_matches)
    }

    /// The results of `projector` applied to every match in `source`
    ///
    /// # Errors
    ///
    /// See [`project`](Self::project).
    pub fn project_with(
        &self,
        source: impl DocumentSource,
        projector: impl Projector + Send + Sync + 'static,
    ) -> wicker_core::Result<Vec<Basket>> {
        self.run("project", Projecting::with_projector(projector), source)
            .map(Projecting::into_matches)
    }

    /// Stream `source` into `sink` with every match replaced by `transform`
    /// applied to it
    ///
    /// # Errors
    ///
    /// See [`project`](Self::project); errors reported by `sink` are
    /// propagated too.
    pub fn rewrite_into<W, F>(&self, source: impl DocumentSource, sink: W, transform: F) -> wicker_core::Result<W>
    where
        W: BasketWriter,
        F: FnMut(Basket) -> Basket,
    {
        self.run("rewrite", Rewriting::new(sink, transform), source)
            .map(Rewriting::into_sink)
    }

    /// `value` with every match replaced by `transform` applied to it
    ///
    /// # Errors
    ///
    /// See [`project`](Self::project).
    pub fn rewrite<F>(&self, value: &Basket, transform: F) -> wicker_core::Result<Basket>
    where
        F: FnMut(Basket) -> Basket,
    {
        let weaver = self.rewrite_into(value, BasketWeaver::new(), transform)?;
        Ok(weaver.weave()?)
    }

    /// The JSON document `text` re-encoded with every match replaced by
    /// `transform` applied to it
    ///
    /// # Errors
    ///
    /// See [`project`](Self::project).
    pub fn rewrite_json<F>(&self, text: &str, transform: F) -> wicker_core::Result<String>
    where
        F: FnMut(Basket) -> Basket,
    {
        let writer = self.rewrite_into(JsonText(text), JsonTextWriter::new(), transform)?;
        Ok(writer.finish()?)
    }
}
