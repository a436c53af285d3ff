//! Construction, completion and the writer surface of [`PathMatchingWriter`]

use crate::basket::{Basket, Number};
use crate::config::{ConfigBuilder, ConfigResult, StreamingConfig};
use crate::error::{WriterError, WriterResult};
use crate::path::Path;
use crate::tree::Projector;
use crate::writer::{BasketWriter, ShapeTracker, Token};

use super::policy::{MatchPolicy, Projecting, Rewriting};
use super::types::{EngineState, EngineStats, PathMatchingWriter};

impl<P: MatchPolicy> PathMatchingWriter<P> {
    /// Engine matching `path` with the default configuration
    pub fn new(path: Path, policy: P) -> Self {
        log::trace!("new match engine for {path}");
        Self {
            path,
            policy,
            config: StreamingConfig::default(),
            shape: ShapeTracker::new(),
            frames: Vec::new(),
            diversion: None,
            state: EngineState::Outer,
            stats: EngineStats::default(),
        }
    }

    /// Replace the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if `config` fails validation.
    pub fn with_config(mut self, config: StreamingConfig) -> ConfigResult<Self> {
        self.config = config.build()?;
        Ok(self)
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn config(&self) -> &StreamingConfig {
        &self.config
    }

    #[inline]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    #[inline]
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Whether the top-level value has been closed
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state == EngineState::Complete
    }

    /// Consume the engine once the document is complete
    ///
    /// # Errors
    ///
    /// `Poisoned` after a failed call, `Incomplete` while the document is
    /// still open or was never started.
    pub fn into_policy(self) -> WriterResult<P> {
        match self.state {
            EngineState::Complete => Ok(self.policy),
            EngineState::Poisoned => Err(WriterError::Poisoned),
            EngineState::Outer | EngineState::Open => Err(WriterError::Incomplete),
        }
    }
}

impl<W, F> PathMatchingWriter<Rewriting<W, F>>
where
    W: BasketWriter,
    F: FnMut(Basket) -> Basket,
{
    /// Engine forwarding the document to `sink` with every subtree matched
    /// by `path` replaced by `transform` applied to it
    pub fn rewriting(path: Path, sink: W, transform: F) -> Self {
        Self::new(path, Rewriting::new(sink, transform))
    }

    /// The sink, after the whole rewritten document was written to it
    ///
    /// # Errors
    ///
    /// See [`into_policy`](Self::into_policy).
    pub fn finish(self) -> WriterResult<W> {
        self.into_policy().map(Rewriting::into_sink)
    }
}

impl PathMatchingWriter<Projecting> {
    /// Engine collecting every subtree matched by `path`
    pub fn projecting(path: Path) -> Self {
        Self::new(path, Projecting::new())
    }

    /// Engine collecting the results of `projector` applied to every match
    pub fn projecting_with(path: Path, projector: impl Projector + Send + Sync + 'static) -> Self {
        Self::new(path, Projecting::with_projector(projector))
    }

    /// Every match, in document order or declared order for multi-key and
    /// multi-index segments
    ///
    /// # Errors
    ///
    /// See [`into_policy`](Self::into_policy).
    pub fn finish(self) -> WriterResult<Vec<Basket>> {
        self.into_policy().map(Projecting::into_matches)
    }

    /// The matches as one array value
    ///
    /// # Errors
    ///
    /// See [`into_policy`](Self::into_policy).
    pub fn finish_array(self) -> WriterResult<Basket> {
        self.finish().map(Basket::array)
    }
}

impl<P: MatchPolicy> BasketWriter for PathMatchingWriter<P> {
    fn begin_object(&mut self) -> WriterResult<()> {
        self.handle(Token::BeginObject)
    }

    fn begin_array(&mut self) -> WriterResult<()> {
        self.handle(Token::BeginArray)
    }

    fn key(&mut self, key: &str) -> WriterResult<()> {
        self.handle(Token::Key(key))
    }

    fn add_string(&mut self, value: &str) -> WriterResult<()> {
        self.handle(Token::String(value))
    }

    fn add_number(&mut self, value: &Number) -> WriterResult<()> {
        self.handle(Token::Number(value))
    }

    fn add_boolean(&mut self, value: bool) -> WriterResult<()> {
        self.handle(Token::Boolean(value))
    }

    fn add_null(&mut self) -> WriterResult<()> {
        self.handle(Token::Null)
    }

    fn end(&mut self) -> WriterResult<()> {
        self.handle(Token::End)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NegativeIndexPolicy;
    use crate::predicate::{has_key, has_key_matching, is_true, number_lt};
    use crate::writer::BasketWeaver;

    fn negate(value: Basket) -> Basket {
        match value {
            Basket::Number(number) => Basket::Number(number.neg()),
            other => other,
        }
    }

    fn path(text: &str) -> Path {
        Path::parse_plain(text).expect("valid path")
    }

    fn rewrite(text: &str, document: &Basket) -> Basket {
        let mut engine = PathMatchingWriter::rewriting(path(text), BasketWeaver::new(), negate);
        document.write_to(&mut engine).expect("well-formed document");
        engine.finish().and_then(BasketWeaver::weave).expect("complete output")
    }

    fn project(path: Path, document: &Basket) -> Vec<Basket> {
        let mut engine = PathMatchingWriter::projecting(path);
        document.write_to(&mut engine).expect("well-formed document");
        engine.finish().expect("complete document")
    }

    fn numbers(values: &[i64]) -> Basket {
        Basket::array(values.iter().copied().map(Basket::from))
    }

    fn books() -> Basket {
        let book = |author: &str, price: i64| {
            Basket::object([("author", Basket::from(author)), ("price", Basket::from(price))])
        };
        Basket::object([(
            "store",
            Basket::object([(
                "book",
                Basket::array([book("REES", 8), book("WAUGH", 12), book("MELVILLE", 9), book("TOLKIEN", 22)]),
            )]),
        )])
    }

    fn authors(matches: &[Basket]) -> Vec<&str> {
        matches
            .iter()
            .filter_map(|book| book.get("author").and_then(Basket::as_str))
            .collect()
    }

    #[test]
    fn test_rewrite_cases() {
        let document = Basket::object([
            ("a", Basket::from(1)),
            ("b", numbers(&[1, 2, 3])),
            ("c", Basket::object([("a", Basket::from(5))])),
        ]);
        let cases = [
            ("$.a", r#"{"a":-1,"b":[1,2,3],"c":{"a":5}}"#, "single key"),
            ("$.b[1]", r#"{"a":1,"b":[1,-2,3],"c":{"a":5}}"#, "index"),
            ("$.b[-1]", r#"{"a":1,"b":[1,2,-3],"c":{"a":5}}"#, "negative index"),
            ("$.b[1:]", r#"{"a":1,"b":[1,-2,-3],"c":{"a":5}}"#, "slice"),
            ("$..a", r#"{"a":-1,"b":[1,2,3],"c":{"a":-5}}"#, "deep scan"),
            ("$.z", r#"{"a":1,"b":[1,2,3],"c":{"a":5}}"#, "no match"),
            ("$.a.b", r#"{"a":1,"b":[1,2,3],"c":{"a":5}}"#, "scalar with remaining path"),
        ];
        for (text, expected, description) in cases {
            let expected = crate::json::parse(expected).expect("valid json");
            assert_eq!(rewrite(text, &document), expected, "{description}");
        }
    }

    #[test]
    fn test_identity_rewrite_of_root() {
        let document = books();
        let mut engine = PathMatchingWriter::rewriting(Path::root(), BasketWeaver::new(), |value| value);
        document.write_to(&mut engine).expect("well-formed document");
        assert_eq!(engine.stats().subtrees_woven, 1);
        assert_eq!(engine.finish().and_then(BasketWeaver::weave), Ok(document));
    }

    #[test]
    fn test_declared_order_projection() {
        let document = books();
        let cases = [
            ("$..book[1,0]", vec!["WAUGH", "REES"]),
            ("$..book[0,100,1]", vec!["REES", "WAUGH"]),
            ("$..book[2,0,2]", vec!["MELVILLE", "REES"]),
            ("$..book[1:3]", vec!["WAUGH", "MELVILLE"]),
            ("$..book[-1]", vec!["TOLKIEN"]),
        ];
        for (text, expected) in cases {
            assert_eq!(authors(&project(path(text), &document)), expected, "{text}");
        }
    }

    #[test]
    fn test_document_order_when_declared_order_disabled() {
        let config = StreamingConfig::new().with_declared_order(false);
        let mut engine = PathMatchingWriter::projecting(path("$..book[1,0]"))
            .with_config(config)
            .expect("valid config");
        books().write_to(&mut engine).expect("well-formed document");
        let matches = engine.finish().expect("complete document");
        assert_eq!(authors(&matches), ["REES", "WAUGH"]);
    }

    #[test]
    fn test_predicate_segments() {
        let document = books();
        let cheap = Path::parse("$..book[?]", [has_key_matching("price", number_lt(10))]).expect("valid path");
        assert_eq!(authors(&project(cheap, &document)), ["REES", "MELVILLE"]);

        let flagged = Basket::array([
            Basket::object([("ok", Basket::from(true)), ("v", Basket::from("a"))]),
            Basket::object([("ok", Basket::from(false)), ("v", Basket::from("b"))]),
        ]);
        let path = Path::parse("$[?].v", [has_key_matching("ok", is_true())]).expect("valid path");
        assert_eq!(project(path, &flagged), [Basket::from("a")]);
    }

    #[test]
    fn test_predicate_rewrite_keeps_rejected_items() {
        let document = Basket::array([
            Basket::object([("n", Basket::from(1))]),
            Basket::object([("m", Basket::from(2))]),
        ]);
        let path = Path::parse("$[?].n", [has_key("n")]).expect("valid path");
        let mut engine = PathMatchingWriter::rewriting(path, BasketWeaver::new(), negate);
        document.write_to(&mut engine).expect("well-formed document");
        assert_eq!(engine.stats().subtrees_rejected, 1);
        let rewritten = engine.finish().and_then(BasketWeaver::weave).expect("complete output");
        assert_eq!(
            rewritten,
            Basket::array([
                Basket::object([("n", Basket::from(-1))]),
                Basket::object([("m", Basket::from(2))]),
            ])
        );
    }

    #[test]
    fn test_only_matches_are_woven() {
        let document = books();
        let mut engine = PathMatchingWriter::projecting(path("$.store.book[*].author"));
        document.write_to(&mut engine).expect("well-formed document");
        let stats = engine.stats().clone();
        let matches = engine.finish().expect("complete document");
        assert_eq!(matches.len(), 4);
        assert_eq!(stats.subtrees_woven, 4);
        assert_eq!(stats.subtrees_resolved, 4);
        assert_eq!(stats.max_frames, 4);
    }

    #[test]
    fn test_projecting_with_sub_projector() {
        let mut engine = PathMatchingWriter::projecting_with(path("$..book[0,1]"), path("$.price"));
        books().write_to(&mut engine).expect("well-formed document");
        assert_eq!(engine.finish_array(), Ok(numbers(&[8, 12])));
    }

    #[test]
    fn test_rejected_negative_index() {
        let config = StreamingConfig::new().with_negative_indices(NegativeIndexPolicy::Reject);
        let mut engine = PathMatchingWriter::projecting(path("$[-1]"))
            .with_config(config)
            .expect("valid config");
        assert_eq!(
            engine.begin_array(),
            Err(WriterError::UnsupportedSegment { segment: "[-1]".into() })
        );
        assert_eq!(engine.add_null(), Err(WriterError::Poisoned));
        assert_eq!(engine.state(), EngineState::Poisoned);
    }

    #[test]
    fn test_protocol_misuse_poisons() {
        let mut engine = PathMatchingWriter::projecting(path("$.a"));
        engine.begin_object().expect("first event");
        assert_eq!(engine.add_null(), Err(WriterError::MissingKey { operation: "add_null" }));
        assert_eq!(engine.key("a"), Err(WriterError::Poisoned));
        assert_eq!(engine.finish(), Err(WriterError::Poisoned));
    }

    #[test]
    fn test_events_after_completion() {
        let mut engine = PathMatchingWriter::projecting(path("$.a"));
        engine.add_null().expect("scalar document");
        assert!(engine.is_complete());
        assert_eq!(
            engine.add_boolean(true),
            Err(WriterError::CompleteWriterMisuse { operation: "add_boolean" })
        );
        assert_eq!(engine.state(), EngineState::Complete);
        assert_eq!(engine.finish(), Ok(Vec::new()));
    }

    #[test]
    fn test_incomplete_document() {
        let mut engine = PathMatchingWriter::projecting(path("$"));
        engine.begin_array().expect("first event");
        assert_eq!(engine.finish(), Err(WriterError::Incomplete));
    }

    #[test]
    fn test_depth_limit() {
        let config = StreamingConfig::new().with_max_depth(2);
        let mut engine = PathMatchingWriter::projecting(path("$..x"))
            .with_config(config)
            .expect("valid config");
        engine.begin_array().expect("depth 1");
        engine.begin_array().expect("depth 2");
        assert_eq!(
            engine.begin_array(),
            Err(WriterError::DepthLimitExceeded { depth: 3, max: 2 })
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = PathMatchingWriter::projecting(Path::root())
            .with_config(StreamingConfig::new().with_max_depth(0));
        assert!(result.is_err());
    }
}
