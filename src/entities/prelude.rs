pub use super::vehicles::Entity as Vehicles;
