//! Repository trait definitions

use async_trait::async_trait;

use crate::errors::RepositoryResult;
use crate::models::{VehicleRecord, Vin};

/// Result of a `put`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The record was written
    Inserted,
    /// A record for the VIN already existed; nothing was written
    AlreadyPresent,
}

/// Persistent keyed storage of decoded vehicles
///
/// Implementations must keep at most one record per VIN. `put` never
/// overwrites: a concurrent duplicate write for the same VIN is absorbed and
/// reported as [`PutOutcome::AlreadyPresent`] rather than returned as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Fetch the record for a VIN
    async fn get(&self, vin: &Vin) -> RepositoryResult<Option<VehicleRecord>>;

    /// Insert a new record
    async fn put(&self, record: &VehicleRecord) -> RepositoryResult<PutOutcome>;

    /// Delete the record for a VIN, returning whether one existed
    async fn delete(&self, vin: &Vin) -> RepositoryResult<bool>;

    /// All records in the store's natural iteration order
    async fn list(&self) -> RepositoryResult<Vec<VehicleRecord>>;
}
