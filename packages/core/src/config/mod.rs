//! Streaming configuration
//!
//! Tunables for the streaming match engine together with the validation layer
//! shared by every configuration type in the crate.

pub mod streaming;
pub mod validation;

pub use streaming::{NegativeIndexPolicy, StreamingConfig};
pub use validation::{
    ConfigBuilder, ConfigDefaults, ConfigResult, ConfigValidator, ConfigurationError, Validator,
};
