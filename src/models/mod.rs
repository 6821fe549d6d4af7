//! Domain models
//!
//! - [`Vin`]: a validated 17-character vehicle identifier
//! - [`VehicleRecord`]: the canonical cached entity
//! - [`VehicleField`]: the fixed table mapping decoder attribute names to stored columns
//! - [`RemoteDecodeResult`]: the transient outcome of one decoder call

pub mod decode;
pub mod vehicle;
pub mod vin;

pub use decode::{DecodedAttributes, DecoderRejection, RemoteDecodeResult};
pub use vehicle::{LookupOutcome, VehicleField, VehicleRecord};
pub use vin::{VIN_LENGTH, Vin};
