//! Error types shared by every stage of the crate.
//!
//! [`TransformError`] wraps configuration and data errors into a single enum
//! so callers can propagate both with `?`.

mod error;

pub use error::{ConfigError, DataError, ParseColorError, TransformError};
