//! # Mosaic Transmission CLI
//!
//! ## Usage
//!
//! ```sh,ignore
//! cargo run --release --bin mosaic-transmission -- --url http://localhost:9091/transmission/rpc stats
//! ```

use clap::Parser;
use mosaic_transmission_types as _;
use thiserror as _;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mosaic_transmission_cli::{cli::Cli, execute};
use mosaic_transmission_rpc::TransmissionClient;

#[cfg(test)]
use httpmock as _;

/// Initializes the tracing subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let config = cli.connection.client_config()?;
    info!("Connecting to {:?}", config);
    let client = TransmissionClient::new(&config)?;

    // Dropping the pending call on Ctrl-C also cancels a running `wait`.
    tokio::select! {
        output = execute(&client, cli.command) => {
            println!("{}", serde_json::to_string_pretty(&output?)?);
        }
        _ = tokio::signal::ctrl_c() => info!("Interrupted"),
    }

    Ok(())
}
