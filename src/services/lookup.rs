//! Cache-first VIN lookup

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::decoder::VinDecoder;
use crate::errors::LookupError;
use crate::models::{LookupOutcome, RemoteDecodeResult, Vin};
use crate::repositories::{PutOutcome, VehicleStore};

/// Serves decoded vehicles from the record store, falling back to the
/// remote decoder on a miss and persisting what it returns.
///
/// Cached records never expire; a record only leaves the store through
/// [`crate::services::EvictionService`]. No lock is held across the decoder
/// call, so two concurrent misses for the same VIN may both decode. The
/// store's non-overwriting `put` keeps the one-record-per-VIN invariant.
#[derive(Clone)]
pub struct LookupService {
    store: Arc<dyn VehicleStore>,
    decoder: Arc<dyn VinDecoder>,
}

impl LookupService {
    pub fn new(store: Arc<dyn VehicleStore>, decoder: Arc<dyn VinDecoder>) -> Self {
        Self { store, decoder }
    }

    pub async fn lookup(&self, raw_vin: Option<&str>) -> Result<LookupOutcome, LookupError> {
        let vin = Vin::parse(raw_vin)?;

        if let Some(record) = self.store.get(&vin).await? {
            debug!(vin = %vin, "Cache hit");
            return Ok(LookupOutcome {
                record,
                was_cached: true,
            });
        }

        debug!(vin = %vin, "Cache miss, calling decoder");
        let attributes = match self.decoder.decode(&vin).await? {
            RemoteDecodeResult::Decoded(attributes) => attributes,
            RemoteDecodeResult::Rejected(rejection) => {
                let message = rejection.message(&vin);
                info!(vin = %vin, error_code = %rejection.error_code, "Decoder rejected VIN");
                return Err(LookupError::UpstreamRejected { message });
            }
        };

        let record = attributes.into_record(vin)?;
        match self.store.put(&record).await? {
            PutOutcome::Inserted => {
                info!(vin = %record.vin, make = %record.make, "Cached newly decoded vehicle");
            }
            PutOutcome::AlreadyPresent => {
                warn!(vin = %record.vin, "Vehicle was cached by a concurrent lookup");
            }
        }

        Ok(LookupOutcome {
            record,
            was_cached: false,
        })
    }
}
