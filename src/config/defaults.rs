/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Database defaults
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./vin-proxy.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

// Decoder defaults
pub const DEFAULT_DECODER_URL_TEMPLATE: &str =
    "https://vpic.nhtsa.dot.gov/api/vehicles/decodevin/{vin}?format=json";
pub const DEFAULT_DECODER_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DECODER_USER_AGENT: &str = concat!("vin-proxy/", env!("CARGO_PKG_VERSION"));

/// Placeholder substituted with the VIN in the decoder URL template
pub const VIN_PLACEHOLDER: &str = "{vin}";

// Environment
pub const ENV_PREFIX: &str = "VIN_PROXY_";
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
