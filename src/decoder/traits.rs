//! Decoder trait definitions

use async_trait::async_trait;

use crate::errors::DecoderResult;
use crate::models::{RemoteDecodeResult, Vin};

/// A single-call VIN decoding authority
///
/// One invocation performs at most one network request. Transport failures
/// are returned as [`crate::errors::DecoderError::Unavailable`] and are not
/// retried here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VinDecoder: Send + Sync {
    async fn decode(&self, vin: &Vin) -> DecoderResult<RemoteDecodeResult>;
}
