//! Application configuration: TOML file plus environment overrides.
//!
//! WEBUTILS_CONFIG_PATH names an optional TOML file; every section may be
//! omitted. Env vars applied afterwards:
//!   PORT              : server port
//!   WEBUTILS_VERBOSE  : "1"/"true" turns on verbose error reporting
//!   LOG_LEVEL         : tracing filter directives
//!   LOG_FORMAT        : "pretty" (default) or "json"
//!   SENDMAIL_PATH     : mail transfer binary

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::{Result, UtilError};
use crate::html::DEFAULT_REDIRECT_TIMEOUT_MS;
use crate::telemetry::{Diagnostics, LogFormat};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppConfig {
  #[serde(default)]
  pub server: ServerConfig,
  #[serde(default)]
  pub http: HttpConfig,
  #[serde(default)]
  pub mail: MailConfig,
  #[serde(default)]
  pub diagnostics: Diagnostics,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_port")]
  pub port: u16,
  /// Delay used by redirect pages when the caller gives none.
  #[serde(default = "default_redirect_timeout_ms")]
  pub redirect_timeout_ms: u64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self { port: default_port(), redirect_timeout_ms: default_redirect_timeout_ms() }
  }
}

#[derive(Clone, Debug, Deserialize)]
pub struct HttpConfig {
  /// No timeout unless set; the transport's own defaults apply.
  #[serde(default)]
  pub timeout_secs: Option<u64>,
  #[serde(default = "default_user_agent")]
  pub user_agent: String,
}

impl Default for HttpConfig {
  fn default() -> Self {
    Self { timeout_secs: None, user_agent: default_user_agent() }
  }
}

#[derive(Clone, Debug, Deserialize)]
pub struct MailConfig {
  #[serde(default = "default_sendmail_path")]
  pub sendmail_path: PathBuf,
}

impl Default for MailConfig {
  fn default() -> Self {
    Self { sendmail_path: default_sendmail_path() }
  }
}

fn default_port() -> u16 { 3000 }
fn default_redirect_timeout_ms() -> u64 { DEFAULT_REDIRECT_TIMEOUT_MS }
fn default_user_agent() -> String { format!("webutils/{}", env!("CARGO_PKG_VERSION")) }
fn default_sendmail_path() -> PathBuf { PathBuf::from("/usr/sbin/sendmail") }

impl AppConfig {
  /// Parse a TOML document.
  pub fn from_toml_str(raw: &str) -> Result<Self> {
    toml::from_str(raw).map_err(|e| UtilError::Config(e.to_string()))
  }

  /// Read and parse a TOML file.
  pub fn from_file(path: &Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path)
      .map_err(|e| UtilError::Config(format!("{}: {e}", path.display())))?;
    let cfg = Self::from_toml_str(&raw)?;
    info!(target: "webutils", path = %path.display(), "Loaded config (TOML)");
    Ok(cfg)
  }

  /// File from WEBUTILS_CONFIG_PATH (if set), then env overrides.
  pub fn load() -> Result<Self> {
    let mut cfg = match std::env::var("WEBUTILS_CONFIG_PATH") {
      Ok(path) => Self::from_file(Path::new(&path))?,
      Err(_) => Self::default(),
    };
    cfg.apply_env(|key| std::env::var(key).ok());
    Ok(cfg)
  }

  /// Apply overrides from a key lookup (the process env in production).
  pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(port) = lookup("PORT").and_then(|p| p.parse::<u16>().ok()) {
      self.server.port = port;
    }
    if let Some(v) = lookup("WEBUTILS_VERBOSE") {
      self.diagnostics.verbose = matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
    }
    if let Some(filter) = lookup("LOG_LEVEL") {
      self.diagnostics.filter = Some(filter);
    }
    if let Some(format) = lookup("LOG_FORMAT") {
      self.diagnostics.format = LogFormat::parse(&format);
    }
    if let Some(path) = lookup("SENDMAIL_PATH") {
      self.mail.sendmail_path = PathBuf::from(path);
    }
  }
}
