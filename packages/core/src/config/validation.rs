//! Core Configuration Utilities
//!
//! Common configuration patterns, validation, and utilities.

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid configuration parameter: {0}")]
    InvalidParameter(String),
}

/// Configuration validation trait
pub trait Validator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` variant if any validation fails:
    /// - `InvalidParameter` - if parameters are outside valid ranges
    fn validate(&self) -> ConfigResult<()>;
}

/// Common configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate numeric range
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidParameter` if the value is outside
    /// the specified range [min, max] (inclusive).
    pub fn validate_range<T>(value: T, min: T, max: T, name: &str) -> ConfigResult<()>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            return Err(ConfigurationError::InvalidParameter(format!(
                "{name} must be between {min} and {max}, got {value}"
            )));
        }

        Ok(())
    }
}

/// Configuration builder pattern helper
pub trait ConfigBuilder<T> {
    /// Builds the final configuration object
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the configuration cannot be built.
    fn build(self) -> ConfigResult<T>;
}

/// Common configuration defaults
pub struct ConfigDefaults;

impl ConfigDefaults {
    /// Deepest nesting serde_json parses before reporting a recursion limit
    pub const JSON_NESTING_LIMIT: usize = 127;
    pub const DEFAULT_MAX_DEPTH: usize = Self::JSON_NESTING_LIMIT;
    /// Depth limits above the JSON parser's own limit would accept documents
    /// the JSON bridge rejects as malformed
    pub const MAX_DEPTH_CEILING: usize = Self::JSON_NESTING_LIMIT;
    pub const DEFAULT_DECLARED_ORDER: bool = true;
}
