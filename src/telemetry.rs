//! Telemetry initialization (tracing/tracing-subscriber) and the verbose
//! error-reporting switch.
//!
//! Behavior:
//! - `Diagnostics::filter` (usually from LOG_LEVEL) controls the filter, e.g.
//!   "debug" or "info,webutils=debug,tower_http=info".
//! - `Diagnostics::format` selects pretty (default) or JSON structured logs.
//! - `Diagnostics::verbose()` is the development switch: everything at
//!   `trace`, thread names in the output, and panics logged with a backtrace.
//!
//! Initialization is process-wide and happens once; there is no way back
//! from verbose mode for the lifetime of the process.

use std::backtrace::Backtrace;

use serde::Deserialize;
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,webutils=debug,tower_http=info,axum=info";

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Diagnostics {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub format: LogFormat,
    /// Explicit filter directives; overrides the built-in default.
    #[serde(default)]
    pub filter: Option<String>,
}

impl Diagnostics {
    /// Development profile: report everything.
    pub fn verbose() -> Self {
        Self { verbose: true, ..Self::default() }
    }

    /// Filter directives that `init` will install.
    pub fn directives(&self) -> String {
        if self.verbose {
            return "trace".to_string();
        }
        self.filter.clone().unwrap_or_else(|| DEFAULT_FILTER.to_string())
    }
}

/// Install the global subscriber. Call once at process start.
pub fn init(diag: &Diagnostics) {
    let filter = EnvFilter::try_new(diag.directives()).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(diag.verbose);

    // Choose JSON vs pretty; don't try to store different layer types.
    match diag.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }

    if diag.verbose {
        install_panic_reporter();
    }
}

/// Route panics through tracing with a forced backtrace, then fall through
/// to the default hook.
fn install_panic_reporter() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let backtrace = Backtrace::force_capture();
        error!(target: "webutils", panic = %info, %backtrace, "Panic");
        default_hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_profile_reports_everything() {
        let diag = Diagnostics::verbose();
        assert!(diag.verbose);
        assert_eq!(diag.directives(), "trace");
    }

    #[test]
    fn default_profile_uses_builtin_filter_unless_overridden() {
        assert_eq!(Diagnostics::default().directives(), DEFAULT_FILTER);
        let custom = Diagnostics { filter: Some("warn".into()), ..Diagnostics::default() };
        assert_eq!(custom.directives(), "warn");
    }

    #[test]
    fn log_format_parsing() {
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("other"), LogFormat::Pretty);
    }
}
