//! Centralized error handling for the VIN proxy
//!
//! Errors are grouped by the layer that produces them:
//!
//! - **Validation Errors**: malformed or missing VIN input, rejected before any I/O
//! - **Repository Errors**: record store failures
//! - **Decoder Errors**: transport and payload failures talking to the decoder authority
//! - **Lookup / Eviction Errors**: the service-level taxonomy surfaced to HTTP callers
//!
//! # Usage
//!
//! ```rust
//! use vin_proxy::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Ok("success".to_string())
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Repository Results
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Convenience type alias for Decoder Results
pub type DecoderResult<T> = Result<T, DecoderError>;
