//! NHTSA vPIC decoder client
//!
//! Calls `decodevin/{vin}?format=json` and reduces the flat variable list to
//! the recognized attributes plus the error triple.
//!
//! # Response shape
//!
//! ```json
//! {
//!   "Count": 136,
//!   "Message": "Results returned successfully ...",
//!   "SearchCriteria": "VIN:1M2AX09C88M003743",
//!   "Results": [
//!     { "Value": "MACK", "ValueId": "...", "Variable": "Make", "VariableId": 26 },
//!     { "Value": "0", "ValueId": "0", "Variable": "Error Code", "VariableId": 143 }
//!   ]
//! }
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::traits::VinDecoder;
use crate::config::DecoderConfig;
use crate::errors::{DecoderError, DecoderResult};
use crate::models::{DecodedAttributes, DecoderRejection, RemoteDecodeResult, VehicleField, Vin};

const ERROR_CODE: &str = "Error Code";
const ERROR_TEXT: &str = "Error Text";
const ADDITIONAL_ERROR_TEXT: &str = "Additional Error Text";

/// `Error Code` value that marks a VIN as rejected
const REJECTED_ERROR_CODE: &str = "1";

/// Top-level vPIC response; `Count`, `Message` and `SearchCriteria` are ignored
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DecodeVinResponse {
    pub results: Vec<DecodeVinVariable>,
}

/// One `{Variable, Value}` entry from the result list
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DecodeVinVariable {
    #[serde(default)]
    pub variable: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// HTTP client for the NHTSA vPIC decoder
#[derive(Clone)]
pub struct NhtsaDecoderClient {
    client: Client,
    config: DecoderConfig,
}

impl NhtsaDecoderClient {
    pub fn new(config: &DecoderConfig) -> DecoderResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| DecoderError::unavailable(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Reduce a vPIC response to a decode result.
    ///
    /// Only `Make`, `Model`, `Model Year`, `Body Class` and the three error
    /// variables are read; everything else is discarded. A `null` value is
    /// read as the empty string. The VIN is rejected only when `Error Code`
    /// is exactly `"1"`; on success the error variables are not carried.
    pub fn classify(response: DecodeVinResponse) -> RemoteDecodeResult {
        let mut attributes = DecodedAttributes::new();
        let mut error_code = None;
        let mut error_text = None;
        let mut additional_error_text = None;

        for entry in response.results {
            let Some(variable) = entry.variable else {
                continue;
            };
            let value = entry.value.unwrap_or_default();

            match variable.as_str() {
                ERROR_CODE => error_code = Some(value),
                ERROR_TEXT => error_text = Some(value),
                ADDITIONAL_ERROR_TEXT => additional_error_text = Some(value),
                other => {
                    if let Some(field) = VehicleField::from_display_name(other) {
                        attributes.insert(field, value);
                    }
                }
            }
        }

        match error_code {
            Some(code) if code == REJECTED_ERROR_CODE => RemoteDecodeResult::Rejected(DecoderRejection {
                error_code: code,
                error_text: error_text.unwrap_or_default(),
                additional_error_text,
            }),
            _ => RemoteDecodeResult::Decoded(attributes),
        }
    }
}

#[async_trait]
impl VinDecoder for NhtsaDecoderClient {
    async fn decode(&self, vin: &Vin) -> DecoderResult<RemoteDecodeResult> {
        let url = self.config.url_for(vin.as_str());
        debug!(vin = %vin, "Decoding VIN via {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            let reason = if e.is_timeout() {
                "request timed out"
            } else {
                "request failed"
            };
            warn!(vin = %vin, error = %e, "VIN decoder {}", reason);
            DecoderError::unavailable(format!("{reason}: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(vin = %vin, status = status.as_u16(), "VIN decoder returned error status");
            return Err(DecoderError::unavailable(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DecoderError::unavailable(format!("failed to read response: {e}")))?;

        let parsed: DecodeVinResponse = serde_json::from_slice(&body)
            .map_err(|e| DecoderError::malformed(format!("invalid decoder response: {e}")))?;

        Ok(Self::classify(parsed))
    }
}
