//! Remote VIN decoder
//!
//! The decoder authority is reached through the [`VinDecoder`] trait so the
//! lookup path can be exercised without the network. [`NhtsaDecoderClient`]
//! is the production implementation against the NHTSA vPIC API.

pub mod nhtsa;
pub mod traits;

pub use nhtsa::NhtsaDecoderClient;
pub use traits::*;
