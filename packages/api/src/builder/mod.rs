//! Query builder API modules
//!
//! Provides the fluent API for configuring a path query and running it over
//! in-memory values or JSON input.

mod core;
mod methods;
mod source;

// Re-export all public types for convenience
pub use self::core::*;
pub use self::methods::*;
pub use self::source::*;
