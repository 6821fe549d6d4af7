//! SeaORM repository implementations

pub mod vehicle;

// Re-export for convenience
pub use vehicle::VehicleSeaOrmRepository;
