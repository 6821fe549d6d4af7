//! Record store abstraction
//!
//! Services depend on the [`VehicleStore`] trait rather than a concrete
//! database, so the lookup, eviction and export paths can be exercised
//! against mocks and so the storage engine stays swappable.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vin_proxy::repositories::VehicleStore;
//!
//! async fn example(store: &dyn VehicleStore, vin: &Vin) {
//!     let cached = store.get(vin).await?;
//!     // ... use cached
//! }
//! ```

pub mod traits;

pub use traits::*;
