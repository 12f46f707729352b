//! Shared state handed to every handler.

use tracing::{info, instrument};

use webutils::config::AppConfig;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: AppConfig,
}

impl AppState {
    #[instrument(level = "info", skip_all)]
    pub fn new(config: AppConfig) -> Self {
        info!(
            target: "webutils",
            port = config.server.port,
            redirect_timeout_ms = config.server.redirect_timeout_ms,
            "Application state ready"
        );
        Self { config }
    }
}
