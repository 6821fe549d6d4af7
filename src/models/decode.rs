use std::collections::HashMap;

use super::vehicle::{VehicleField, VehicleRecord};
use super::vin::Vin;
use crate::errors::LookupError;

/// Outcome of a single decoder call. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteDecodeResult {
    Decoded(DecodedAttributes),
    Rejected(DecoderRejection),
}

/// Recognized vehicle attributes from a successful decode, keyed by field.
///
/// Values are kept as text exactly as the decoder sent them; conversion to
/// typed record fields happens in [`DecodedAttributes::into_record`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedAttributes {
    values: HashMap<VehicleField, String>,
}

impl DecodedAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: VehicleField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn with(mut self, field: VehicleField, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: VehicleField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Build the record to persist, converting the model year to an integer
    pub fn into_record(mut self, vin: Vin) -> Result<VehicleRecord, LookupError> {
        let mut take = |field: VehicleField| {
            self.values.remove(&field).ok_or_else(|| {
                LookupError::malformed(format!(
                    "missing '{}' for VIN {}",
                    field.display_name(),
                    vin
                ))
            })
        };

        let make = take(VehicleField::Make)?;
        let model = take(VehicleField::Model)?;
        let raw_year = take(VehicleField::ModelYear)?;
        let body_class = take(VehicleField::BodyClass)?;

        let model_year = raw_year.trim().parse::<i32>().map_err(|_| {
            LookupError::malformed(format!(
                "non-numeric model year '{raw_year}' for VIN {vin}"
            ))
        })?;

        Ok(VehicleRecord {
            vin,
            make,
            model,
            model_year,
            body_class,
        })
    }
}

/// The decoder authority's own verdict that a VIN is invalid or unknown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderRejection {
    pub error_code: String,
    pub error_text: String,
    pub additional_error_text: Option<String>,
}

impl DecoderRejection {
    /// Client-facing message: `"{vin} {error_text}"` followed directly by the
    /// additional text when present. No separator is inserted before the
    /// additional text.
    pub fn message(&self, vin: &Vin) -> String {
        let mut message = format!("{} {}", vin, self.error_text);
        if let Some(additional) = self
            .additional_error_text
            .as_deref()
            .filter(|text| !text.is_empty())
        {
            message.push_str(additional);
        }
        message
    }
}
