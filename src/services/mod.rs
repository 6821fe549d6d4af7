//! Service layer
//!
//! Business logic sits here, between the HTTP handlers and the record store.
//! Each service owns its dependencies behind trait objects:
//!
//! - [`LookupService`]: cache-first decode of a VIN
//! - [`EvictionService`]: explicit removal of a cached VIN
//! - [`ExportService`]: parquet rendering of every cached vehicle

pub mod eviction;
pub mod export;
pub mod lookup;

pub use eviction::EvictionService;
pub use export::{EXPORT_FILE_NAME, EXPORT_MEDIA_TYPE, ExportArtifact, ExportService, ExportStream};
pub use lookup::LookupService;
