//! Outgoing HTML mail through the host's mail transfer agent.
//!
//! `Mailer` formats the message; a `MailTransport` hands it off. The default
//! transport pipes the message into a sendmail-compatible binary, which reads
//! recipients from the headers (`-t`). There is no retry and no delivery
//! confirmation: success only means the transport accepted the message.

use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{info, instrument, warn};

use crate::config::MailConfig;
use crate::error::{Result, UtilError};

/// Address plus display name, rendered as `Name <address>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mailbox {
  pub address: String,
  pub name: String,
}

impl Mailbox {
  pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
    Self { address: address.into(), name: name.into() }
  }
}

impl fmt::Display for Mailbox {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} <{}>", header_safe(&self.name), header_safe(&self.address))
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Email {
  pub to: Mailbox,
  pub from: Mailbox,
  pub subject: String,
  pub html_body: String,
}

impl Email {
  /// Full RFC 5322 style message: headers, blank line, HTML body.
  pub fn to_message(&self) -> String {
    format!(
      "To: {}\nFrom: {}\nSubject: {}\nMIME-Version: 1.0\nContent-Type: text/html; charset=utf-8\n\n{}\n",
      self.to,
      self.from,
      header_safe(&self.subject),
      self.html_body
    )
  }
}

/// Header values must stay on one line.
fn header_safe(value: &str) -> String {
  value.replace(['\r', '\n'], " ")
}

#[async_trait]
pub trait MailTransport: Send + Sync {
  async fn deliver(&self, email: &Email) -> Result<()>;
}

/// Pipes messages into `sendmail -t -i` (or any compatible program).
#[derive(Clone, Debug)]
pub struct SendmailTransport {
  program: PathBuf,
  args: Vec<String>,
}

impl SendmailTransport {
  pub fn new(program: impl Into<PathBuf>) -> Self {
    Self { program: program.into(), args: vec!["-t".into(), "-i".into()] }
  }

  pub fn with_args(mut self, args: Vec<String>) -> Self {
    self.args = args;
    self
  }
}

#[async_trait]
impl MailTransport for SendmailTransport {
  async fn deliver(&self, email: &Email) -> Result<()> {
    let mut child = Command::new(&self.program)
      .args(&self.args)
      .stdin(Stdio::piped())
      .stdout(Stdio::null())
      .stderr(Stdio::piped())
      .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
      stdin.write_all(email.to_message().as_bytes()).await?;
      // Dropping stdin closes the pipe so the MTA sees end of message.
    }

    let output = child.wait_with_output().await?;
    if output.status.success() {
      Ok(())
    } else {
      let stderr = String::from_utf8_lossy(&output.stderr);
      Err(UtilError::Mail(format!("{} exited with {}: {}", self.program.display(), output.status, stderr.trim())))
    }
  }
}

pub struct Mailer<T: MailTransport = SendmailTransport> {
  transport: T,
}

impl Mailer<SendmailTransport> {
  /// Mailer backed by the configured sendmail binary.
  pub fn sendmail(cfg: &MailConfig) -> Self {
    Self::new(SendmailTransport::new(cfg.sendmail_path.clone()))
  }
}

impl<T: MailTransport> Mailer<T> {
  pub fn new(transport: T) -> Self {
    Self { transport }
  }

  #[instrument(level = "info", skip(self, recipient_name, from_name, subject, html_body), fields(body_len = html_body.len()))]
  pub async fn try_send_email(
    &self,
    recipient: &str,
    recipient_name: &str,
    from: &str,
    from_name: &str,
    subject: &str,
    html_body: &str,
  ) -> Result<()> {
    let email = Email {
      to: Mailbox::new(recipient, recipient_name),
      from: Mailbox::new(from, from_name),
      subject: subject.to_string(),
      html_body: html_body.to_string(),
    };
    self.transport.deliver(&email).await?;
    info!(target: "webutils::mail", %recipient, "Mail handed to transport");
    Ok(())
  }

  /// Best-effort send: `true` if the transport accepted the message.
  pub async fn send_email(
    &self,
    recipient: &str,
    recipient_name: &str,
    from: &str,
    from_name: &str,
    subject: &str,
    html_body: &str,
  ) -> bool {
    match self
      .try_send_email(recipient, recipient_name, from, from_name, subject, html_body)
      .await
    {
      Ok(()) => true,
      Err(e) => {
        warn!(target: "webutils::mail", %recipient, error = %e, "Mail not sent");
        false
      }
    }
  }
}
