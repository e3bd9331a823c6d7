//! # twextract
//!
//! A Rust web service that extracts tweets, users and pagination cursors
//! from the Twitter/X web API and serves them as JSON.
//!
//! ## Environment Variables
//!
//! - `xapi_auth_token`: Bearer token of the Twitter web client
//! - `xapi_cookie`: Cookie header of a logged-in session
//! - `xapi_csrf_token`: CSRF token (optional, read from the `ct0` cookie when unset)
//! - `xapi_api_base`: API base URL (optional)
//! - `PORT`: Server port (defaults to 3000)

use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use twextract::{get_server_port, handlers::router, Scraper, TwitterConfig};

/// Main entry point for the twextract web service.
///
/// Initializes logging, loads the session credentials, and serves the
/// extraction endpoints until terminated.
///
/// # Logging
///
/// The application uses the `env_logger` crate. Log levels can be
/// controlled via the `RUST_LOG` environment variable.
///
/// # Example Usage
///
/// ```bash
/// # Run on custom port with debug logging
/// PORT=8080 RUST_LOG=debug cargo run
/// ```
#[tokio::main]
async fn main() {
    env_logger::init();

    let config = match TwitterConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Cannot start without Twitter credentials: {}", e);
            return;
        }
    };

    let scraper = Arc::new(Scraper::from_config(config));
    let app = router(scraper).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let port = get_server_port();
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    info!("Starting twextract server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            return;
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("HTTP server error: {}", e);
    }
}
