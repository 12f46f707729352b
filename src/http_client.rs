//! Outbound HTTP helpers: REST calls, remote existence probes, file downloads.
//!
//! Each operation comes in two flavors: `try_*` returns a typed error, the
//! plain one logs the failure and collapses it to `None` / `false`. Calls log
//! URLs, statuses and sizes, never bodies.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{multipart::Form, redirect::Policy, StatusCode};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::HttpConfig;
use crate::error::{Result, UtilError};

/// Bytes written per `write_all` while streaming a download.
pub const DOWNLOAD_CHUNK_SIZE: usize = 8 * 1024;

#[derive(Clone)]
pub struct HttpClient {
  client: reqwest::Client,
  /// Same settings, but redirects are reported instead of followed.
  probe: reqwest::Client,
}

impl HttpClient {
  pub fn new(cfg: &HttpConfig) -> Result<Self> {
    let builder = || {
      let b = reqwest::Client::builder().user_agent(cfg.user_agent.clone());
      match cfg.timeout_secs {
        Some(secs) => b.timeout(Duration::from_secs(secs)),
        None => b,
      }
    };
    Ok(Self {
      client: builder().build()?,
      probe: builder().redirect(Policy::none()).build()?,
    })
  }

  /// GET `url` when `post` is empty, otherwise POST the fields as
  /// multipart form data. Returns the body whatever the status code.
  #[instrument(level = "info", skip(self, post), fields(post_fields = post.len()))]
  pub async fn try_rest_result(&self, url: &str, post: &[(String, String)]) -> Result<String> {
    let url = parse_url(url)?;
    let req = if post.is_empty() {
      self.client.get(url)
    } else {
      let form = post
        .iter()
        .fold(Form::new(), |form, (k, v)| form.text(k.clone(), v.clone()));
      self.client.post(url).multipart(form)
    };

    let res = req.send().await?;
    let status = res.status();
    let body = res.text().await?;
    debug!(target: "webutils::http", %status, body_len = body.len(), "REST call completed");
    Ok(body)
  }

  /// Best-effort [`try_rest_result`](Self::try_rest_result): `None` on any
  /// transport failure.
  pub async fn rest_result(&self, url: &str, post: &[(String, String)]) -> Option<String> {
    match self.try_rest_result(url, post).await {
      Ok(body) => Some(body),
      Err(e) => {
        warn!(target: "webutils::http", %url, error = %e, "REST call failed");
        None
      }
    }
  }

  /// Anything but a 404 counts as existing, redirects and 5xx included.
  #[instrument(level = "debug", skip(self))]
  pub async fn try_file_exists_url(&self, url: &str) -> Result<bool> {
    let res = self.probe.get(parse_url(url)?).send().await?;
    let status = res.status();
    debug!(target: "webutils::http", %status, "Existence probe answered");
    Ok(status != StatusCode::NOT_FOUND)
  }

  /// Best-effort [`try_file_exists_url`](Self::try_file_exists_url):
  /// an unreachable host reads as "does not exist".
  pub async fn file_exists_url(&self, url: &str) -> bool {
    match self.try_file_exists_url(url).await {
      Ok(exists) => exists,
      Err(e) => {
        warn!(target: "webutils::http", %url, error = %e, "Existence probe failed");
        false
      }
    }
  }

  /// Stream `url` into `path`, returning the number of bytes written.
  ///
  /// The destination is only created once the source answered with a
  /// success status. Writes go straight to `path`; an interrupted transfer
  /// leaves a truncated file behind.
  #[instrument(level = "info", skip(self, path), fields(path = %path.display()))]
  pub async fn try_download_file(&self, url: &str, path: &Path) -> Result<u64> {
    let res = self.client.get(parse_url(url)?).send().await?;
    if !res.status().is_success() {
      return Err(UtilError::Status { status: res.status().as_u16(), url: url.to_string() });
    }

    let mut file = tokio::fs::File::create(path).await?;
    let mut stream = res.bytes_stream();
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
      let chunk = chunk?;
      for piece in chunk.chunks(DOWNLOAD_CHUNK_SIZE) {
        file.write_all(piece).await?;
        written += piece.len() as u64;
      }
    }
    file.flush().await?;

    info!(target: "webutils::http", bytes = written, "Download finished");
    Ok(written)
  }

  /// Best-effort [`try_download_file`](Self::try_download_file).
  pub async fn download_file(&self, url: &str, path: &Path) -> Option<u64> {
    match self.try_download_file(url, path).await {
      Ok(n) => Some(n),
      Err(e) => {
        warn!(target: "webutils::http", %url, path = %path.display(), error = %e, "Download failed");
        None
      }
    }
  }
}

fn parse_url(raw: &str) -> Result<Url> {
  Url::parse(raw).map_err(|e| UtilError::InvalidUrl(format!("{raw}: {e}")))
}
