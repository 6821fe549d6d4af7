//! Error type definitions for the VIN proxy
//!
//! The Display text of the validation and lookup errors is part of the public
//! HTTP contract: it is rendered verbatim into the `detail` field of error bodies.

use thiserror::Error;

/// Detail text returned for any VIN that is not exactly 17 characters long.
pub const INVALID_VIN_DETAIL: &str = "Invalid VIN. VIN must be 17 characters.";

/// Detail text returned when no VIN was supplied at all.
pub const NOT_FOUND_DETAIL: &str = "Not Found";

/// Top-level application error type
///
/// Used by bootstrap code and the export path; request-scoped VIN operations
/// use the narrower [`LookupError`] and [`EvictionError`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors (SeaORM)
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Repository layer errors
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Remote decoder errors
    #[error("Decoder error: {0}")]
    Decoder(#[from] DecoderError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Export artifact rendering errors
    #[error("Export error: {message}")]
    Export { message: String },

    /// Filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Repository layer specific errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database errors from SeaORM
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A persisted value could not be mapped back onto a domain record
    #[error("Invalid stored value: {table}.{field} = {value}")]
    InvalidStoredValue {
        table: String,
        field: String,
        value: String,
    },
}

/// VIN input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VinError {
    /// No VIN was supplied
    #[error("Not Found")]
    Missing,

    /// The VIN was supplied but is not exactly 17 characters long
    #[error("Invalid VIN. VIN must be 17 characters.")]
    InvalidLength { length: usize },
}

/// Remote decoder client errors
#[derive(Error, Debug)]
pub enum DecoderError {
    /// Transport failure, timeout or non-success HTTP status
    #[error("{message}")]
    Unavailable { message: String },

    /// The decoder answered but the payload could not be understood
    #[error("{message}")]
    Malformed { message: String },
}

/// Lookup service errors
#[derive(Error, Debug)]
pub enum LookupError {
    /// Missing or wrong-length VIN
    #[error(transparent)]
    InvalidInput(#[from] VinError),

    /// The decoder authority reports the VIN as invalid or unknown
    #[error("{message}")]
    UpstreamRejected { message: String },

    /// The decoder authority could not be reached
    #[error("VIN decoding service unavailable: {message}")]
    UpstreamUnavailable { message: String },

    /// The decoder authority returned data that cannot become a record
    #[error("Malformed response from VIN decoding service: {message}")]
    MalformedUpstreamData { message: String },

    /// Record store failure
    #[error("Storage operation failed")]
    Store(#[from] RepositoryError),
}

/// Eviction service errors
#[derive(Error, Debug)]
pub enum EvictionError {
    /// Missing or wrong-length VIN
    #[error(transparent)]
    InvalidInput(#[from] VinError),

    /// Record store failure
    #[error("Storage operation failed")]
    Store(#[from] RepositoryError),
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an export error
    pub fn export<S: Into<String>>(message: S) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl DecoderError {
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

impl LookupError {
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedUpstreamData {
            message: message.into(),
        }
    }
}

impl From<DecoderError> for LookupError {
    fn from(error: DecoderError) -> Self {
        match error {
            DecoderError::Unavailable { message } => Self::UpstreamUnavailable { message },
            DecoderError::Malformed { message } => Self::MalformedUpstreamData { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vin_error_detail_text() {
        assert_eq!(VinError::Missing.to_string(), NOT_FOUND_DETAIL);
        assert_eq!(
            VinError::InvalidLength { length: 6 }.to_string(),
            INVALID_VIN_DETAIL
        );
    }

    #[test]
    fn test_lookup_and_eviction_share_validation_text() {
        let lookup = LookupError::from(VinError::InvalidLength { length: 3 });
        let eviction = EvictionError::from(VinError::InvalidLength { length: 3 });
        assert_eq!(lookup.to_string(), eviction.to_string());
    }

    #[test]
    fn test_decoder_error_classification() {
        let unavailable: LookupError = DecoderError::unavailable("timed out").into();
        assert!(matches!(unavailable, LookupError::UpstreamUnavailable { .. }));

        let malformed: LookupError = DecoderError::malformed("bad json").into();
        assert!(matches!(malformed, LookupError::MalformedUpstreamData { .. }));
    }
}
