//! Streaming engine configuration
//!
//! [`StreamingConfig`] controls how deep a streamed document may nest, whether
//! projections honour the declared order of multi-index and multi-key
//! segments, and what happens to segments whose meaning depends on the length
//! of an array that has not been fully seen yet.

use serde::{Deserialize, Serialize};

use super::validation::{
    ConfigBuilder, ConfigDefaults, ConfigResult, ConfigValidator, Validator,
};

/// Handling of negative indices and negative slice bounds while streaming
///
/// A negative position counts back from the end of an array, which is
/// unknown until the array closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegativeIndexPolicy {
    /// Buffer the whole array and resolve the segment once it is complete
    #[default]
    Buffer,
    /// Fail with `WriterError::UnsupportedSegment` instead of buffering
    Reject,
}

/// Streaming match engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Maximum container nesting accepted from the producer
    pub max_depth: usize,
    /// Emit projection matches of `[2,0]` / `['b','a']` in declared order
    pub declared_order: bool,
    /// Negative position handling
    pub negative_indices: NegativeIndexPolicy,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            max_depth: ConfigDefaults::DEFAULT_MAX_DEPTH,
            declared_order: ConfigDefaults::DEFAULT_DECLARED_ORDER,
            negative_indices: NegativeIndexPolicy::default(),
        }
    }
}

impl StreamingConfig {
    /// Create configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_declared_order(mut self, declared_order: bool) -> Self {
        self.declared_order = declared_order;
        self
    }

    #[must_use]
    pub fn with_negative_indices(mut self, policy: NegativeIndexPolicy) -> Self {
        self.negative_indices = policy;
        self
    }

    /// Load configuration from JSON text and validate it
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON for this type or the
    /// resulting configuration fails validation.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(crate::error::JsonError::from)?;
        config.validate()?;
        Ok(config)
    }
}

impl Validator for StreamingConfig {
    fn validate(&self) -> ConfigResult<()> {
        ConfigValidator::validate_range(
            self.max_depth,
            1,
            ConfigDefaults::MAX_DEPTH_CEILING,
            "max_depth",
        )
    }
}

impl ConfigBuilder<StreamingConfig> for StreamingConfig {
    fn build(self) -> ConfigResult<StreamingConfig> {
        self.validate()?;
        Ok(self)
    }
}
