//! webutils demo host
//!
//! - Axum HTTP API exercising the request-context and output helpers
//! - Configuration from TOML + env (see `webutils::config`)
//!
//! Important env variables:
//!   PORT                 : u16 (default 3000)
//!   WEBUTILS_CONFIG_PATH : path to TOML config
//!   WEBUTILS_VERBOSE     : "true" for development-level error reporting
//!   LOG_LEVEL            : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT           : "pretty" (default) or "json"

mod protocol;
mod routes;
mod state;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

use webutils::{config::AppConfig, telemetry};

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  let config = AppConfig::load()?;
  telemetry::init(&config.diagnostics);
  info!(target: "webutils", verbose = config.diagnostics.verbose, format = ?config.diagnostics.format, "Diagnostics initialized");

  let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
  let state = Arc::new(AppState::new(config));
  let app = build_router(state);

  let listener = TcpListener::bind(addr).await?;
  info!(target: "webutils", %addr, "HTTP server listening");
  axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
  info!(target: "webutils", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(target: "webutils", error = %e, "Ctrl-C handler unavailable; graceful shutdown disabled");
    std::future::pending::<()>().await;
  }
}
