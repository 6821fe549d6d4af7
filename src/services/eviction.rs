//! Explicit cache eviction

use std::sync::Arc;
use tracing::{debug, info};

use crate::errors::EvictionError;
use crate::models::Vin;
use crate::repositories::VehicleStore;

/// Removes cached vehicles. Evicting an absent VIN is a normal outcome.
#[derive(Clone)]
pub struct EvictionService {
    store: Arc<dyn VehicleStore>,
}

impl EvictionService {
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self { store }
    }

    /// Returns `true` when a record was removed, `false` when none existed.
    ///
    /// The VIN is validated with the same rule as lookup. The delete is a
    /// single statement, so two concurrent evictions of one VIN report `true`
    /// at most once.
    pub async fn evict(&self, raw_vin: Option<&str>) -> Result<bool, EvictionError> {
        let vin = Vin::parse(raw_vin)?;

        let removed = self.store.delete(&vin).await?;
        if removed {
            info!(vin = %vin, "Evicted cached vehicle");
        } else {
            debug!(vin = %vin, "Nothing cached to evict");
        }
        Ok(removed)
    }
}
