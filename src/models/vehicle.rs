use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use super::vin::Vin;

/// The decoded attributes cached per VIN.
///
/// Variants are the stable internal identifiers. The strum names are the
/// human-formatted names used by the decoder authority and by HTTP/export
/// output (`"Model Year"`); the record store keeps its own snake_case
/// columns in [`crate::entities::vehicles`], so presentation names never
/// reach the persisted schema.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, IntoStaticStr, Display,
)]
pub enum VehicleField {
    #[strum(serialize = "Make")]
    Make,
    #[strum(serialize = "Model")]
    Model,
    #[strum(serialize = "Model Year")]
    ModelYear,
    #[strum(serialize = "Body Class")]
    BodyClass,
}

impl VehicleField {
    /// Human-formatted name, as returned by the decoder and rendered to clients
    pub fn display_name(&self) -> &'static str {
        (*self).into()
    }

    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::from_str(name).ok()
    }

    /// All fields in presentation order
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

/// A decoded vehicle as held in the record store.
///
/// Records are created only from a successful decode and are immutable for
/// their lifetime; there is no update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub vin: Vin,
    pub make: String,
    pub model: String,
    pub model_year: i32,
    pub body_class: String,
}

impl VehicleRecord {
    /// Render one attribute the way it is presented to clients
    pub fn presented_value(&self, field: VehicleField) -> String {
        match field {
            VehicleField::Make => self.make.clone(),
            VehicleField::Model => self.model.clone(),
            VehicleField::ModelYear => self.model_year.to_string(),
            VehicleField::BodyClass => self.body_class.clone(),
        }
    }

    /// Attributes keyed by their human-formatted names, in presentation order
    pub fn presentation(&self) -> Vec<(&'static str, String)> {
        VehicleField::all()
            .map(|field| (field.display_name(), self.presented_value(field)))
            .collect()
    }
}

/// Result of a lookup: the record and whether it was served from the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOutcome {
    pub record: VehicleRecord,
    pub was_cached: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> VehicleRecord {
        VehicleRecord {
            vin: Vin::try_from("1M2AX09C88M003743").unwrap(),
            make: "MACK".to_string(),
            model: "GU (Granite)".to_string(),
            model_year: 2008,
            body_class: "Truck".to_string(),
        }
    }

    #[test]
    fn test_display_names_round_trip() {
        for field in VehicleField::all() {
            assert_eq!(VehicleField::from_display_name(field.display_name()), Some(field));
            assert_eq!(field.to_string(), field.display_name());
        }
        let names: Vec<&str> = VehicleField::all().map(|f| f.display_name()).collect();
        assert_eq!(names, vec!["Make", "Model", "Model Year", "Body Class"]);
    }

    #[test]
    fn test_unrecognized_names_are_not_fields() {
        assert_eq!(VehicleField::from_display_name("Error Code"), None);
        assert_eq!(VehicleField::from_display_name("model_year"), None);
    }

    #[test]
    fn test_presentation_uses_display_names() {
        let presented = record().presentation();
        assert_eq!(
            presented,
            vec![
                ("Make", "MACK".to_string()),
                ("Model", "GU (Granite)".to_string()),
                ("Model Year", "2008".to_string()),
                ("Body Class", "Truck".to_string()),
            ]
        );
    }
}
