//! Shared fixtures for integration tests
//!
//! Builds the real router over an in-memory SQLite store, with an httpmock
//! server standing in for the NHTSA decoder.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{Value, json};
use tempfile::TempDir;

use vin_proxy::{
    config::{Config, DecoderConfig},
    database::Database,
    decoder::NhtsaDecoderClient,
    web::{AppState, create_router},
};

pub const MACK_VIN: &str = "1M2AX09C88M003743";
pub const BAD_CHECK_DIGIT_VIN: &str = "1XP5DB9X7XD487945";
pub const PETERBILT_VIN: &str = "1XP5DB9X7XD487964";

pub const CHECK_DIGIT_ERROR: &str = "1 - Check Digit (9th position) does not calculate properly";

pub struct TestApp {
    pub server: TestServer,
    pub decoder: MockServer,
    pub scratch: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let decoder = MockServer::start_async().await;
        let scratch = tempfile::tempdir().expect("scratch dir");

        let mut config = Config::default();
        config.decoder = DecoderConfig {
            url_template: decoder.url("/api/vehicles/decodevin/{vin}?format=json"),
            timeout: Duration::from_secs(5),
            ..DecoderConfig::default()
        };
        config.storage.temp_path = Some(scratch.path().to_path_buf());

        let database = Database::new_in_memory().await.expect("in-memory database");
        database.migrate().await.expect("migrations");

        let client = NhtsaDecoderClient::new(&config.decoder).expect("decoder client");
        let state = AppState::new(config, database, Arc::new(client));
        let server = TestServer::new(create_router(state)).expect("test server");

        Self {
            server,
            decoder,
            scratch,
        }
    }

    pub fn scratch_file_count(&self) -> usize {
        std::fs::read_dir(self.scratch.path())
            .expect("read scratch dir")
            .count()
    }

    /// Serve a decoder response for one VIN
    pub async fn mock_decode(&self, vin: &str, body: Value) -> Mock<'_> {
        let path = format!("/api/vehicles/decodevin/{vin}");
        self.decoder
            .mock_async(|when, then| {
                when.method(GET).path(path).query_param("format", "json");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(body);
            })
            .await
    }
}

/// A vPIC payload built from `(Variable, Value)` pairs, padded with the
/// kind of unrelated variables the real service returns
pub fn vpic_body(vin: &str, entries: &[(&str, Option<&str>)]) -> Value {
    let mut results: Vec<Value> = entries
        .iter()
        .map(|(variable, value)| {
            json!({
                "Value": value,
                "ValueId": null,
                "Variable": variable,
                "VariableId": 0
            })
        })
        .collect();
    results.push(json!({
        "Value": null,
        "ValueId": null,
        "Variable": "Trim",
        "VariableId": 38
    }));
    results.push(json!({
        "Value": "UNITED STATES (USA)",
        "ValueId": "6",
        "Variable": "Plant Country",
        "VariableId": 75
    }));

    json!({
        "Count": results.len(),
        "Message": "Results returned successfully. NOTE: Any missing decoded values should be interpreted as NHTSA does not have data on the specific variable. Missing value should NOT be interpreted as an indication that a feature or technology is unavailable for a vehicle.",
        "SearchCriteria": format!("VIN:{vin}"),
        "Results": results
    })
}

pub fn mack_body() -> Value {
    vpic_body(
        MACK_VIN,
        &[
            ("Error Code", Some("0")),
            (
                "Error Text",
                Some("0 - VIN decoded clean. Check Digit (9th position) is correct"),
            ),
            ("Additional Error Text", None),
            ("Make", Some("MACK")),
            ("Model", Some("GU (Granite)")),
            ("Model Year", Some("2008")),
            ("Body Class", Some("Truck")),
        ],
    )
}

pub fn peterbilt_body() -> Value {
    vpic_body(
        PETERBILT_VIN,
        &[
            ("Error Code", Some("0")),
            (
                "Error Text",
                Some("0 - VIN decoded clean. Check Digit (9th position) is correct"),
            ),
            ("Additional Error Text", None),
            ("Make", Some("PETERBILT")),
            ("Model", Some("379")),
            ("Model Year", Some("1999")),
            ("Body Class", Some("Truck-Tractor")),
        ],
    )
}

pub fn rejected_body() -> Value {
    vpic_body(
        BAD_CHECK_DIGIT_VIN,
        &[
            ("Error Code", Some("1")),
            ("Error Text", Some(CHECK_DIGIT_ERROR)),
            ("Additional Error Text", None),
            ("Make", Some("PETERBILT")),
            ("Model", Some("")),
            ("Model Year", Some("1999")),
            ("Body Class", Some("")),
        ],
    )
}
