//! Error type shared by the fallible (`try_*`) helpers.
//!
//! The best-effort helpers log these and collapse them to `None` / `false`.

#[derive(Debug, thiserror::Error)]
pub enum UtilError {
  #[error("HTTP request failed: {0}")]
  Http(#[from] reqwest::Error),
  #[error("HTTP {status} from {url}")]
  Status { status: u16, url: String },
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
  #[error("Mail delivery failed: {0}")]
  Mail(String),
  #[error("Invalid URL: {0}")]
  InvalidUrl(String),
  #[error("Configuration error: {0}")]
  Config(String),
}

pub type Result<T> = std::result::Result<T, UtilError>;
