// Main entry point for imagebed-relay.
// Parses configuration, builds the outbound transport and uploader,
// configures the Axum router, and starts the HTTP server.

mod backends;
mod config;
mod error;
mod models;
mod shutdown_signal;
mod signature;
mod transport;
mod uploader;
mod web;

use backends::Backend;
use clap::Parser;
use config::AppConfig;
use shutdown_signal::shutdown_signal;
use std::sync::Arc;
use tracing::Level;
use transport::HttpTransport;
use uploader::Uploader;

#[tokio::main]
async fn main() {
    // Parse command line args and environment variables
    let config = AppConfig::parse();

    // Initialize tracing subscriber for structured logging.
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting imagebed-relay...");

    let transport = match HttpTransport::new(config.upstream_timeout()) {
        Ok(transport) => transport,
        Err(e) => {
            tracing::error!("FATAL: Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let uploader = Uploader::new(Arc::new(transport), config.credentials());

    for backend in Backend::ALL {
        if uploader.is_configured(backend) {
            tracing::info!("Backend '{}' is configured", backend);
        } else {
            tracing::warn!(
                "Backend '{}' is not configured; uploads to it will fail",
                backend
            );
        }
    }

    let app = web::create_app(Arc::new(uploader), config.max_body_bytes);
    tracing::info!("Axum router configured.");

    // --- Start HTTP Server ---
    let listener = match web::create_listener(&config.host, config.port).await {
        Ok((addr, l)) => {
            tracing::info!("Server successfully bound. Listening on {}", addr);
            l
        }
        Err(e) => {
            tracing::error!("FATAL: Failed to bind server: {}", e);
            eprintln!("FATAL: Could not bind server. Error: {}. Exiting.", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server run error: {}", e);
        eprintln!("ERROR: Server shut down unexpectedly. Error: {}", e);
    }

    tracing::info!("imagebed-relay has shut down.");
}
