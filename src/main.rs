use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Use the library instead of redeclaring modules
use vin_proxy::{
    config::{Config, defaults::DEFAULT_CONFIG_FILE},
    database::Database,
    decoder::NhtsaDecoderClient,
    web::{AppState, WebServer},
};

#[derive(Parser)]
#[command(name = "vin-proxy")]
#[command(version)]
#[command(about = "A caching lookup proxy for the NHTSA VIN decoding service")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Database URL (overrides config file)
    #[arg(short = 'd', long, value_name = "URL")]
    database_url: Option<String>,

    /// Decoder endpoint template containing `{vin}` (overrides config file)
    #[arg(long, value_name = "URL")]
    decoder_url: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = if cli.log_level == "trace" {
        format!("vin_proxy={},tower_http=trace", cli.log_level)
    } else {
        format!("vin_proxy={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting VIN Proxy v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(database_url) = cli.database_url {
        config.database.url = database_url;
    }
    if let Some(decoder_url) = cli.decoder_url {
        config.decoder.url_template = decoder_url;
    }
    config.validate()?;

    info!("Using database: {}", config.database.url);
    let database = Database::new(&config.database).await?;
    database.migrate().await?;
    info!("Database connection established and migrations applied");

    let decoder = NhtsaDecoderClient::new(&config.decoder)?;
    info!(
        "VIN decoder: {} (timeout {})",
        config.decoder.url_template,
        humantime::format_duration(config.decoder.timeout)
    );

    let state = AppState::new(config, database, Arc::new(decoder));
    let server = WebServer::new(state)?;
    info!(
        "Web server starting on http://{}:{}",
        server.host(),
        server.port()
    );

    server.serve().await?;
    info!("VIN Proxy stopped");
    Ok(())
}
