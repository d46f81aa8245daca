/**
 * Mail Transports
 *
 * The `Mailer` trait is the seam between the notification workers and the
 * outside world.
 *
 * - `SmtpMailer` delivers through an SMTP relay with lettre
 * - `LogMailer` only logs the message, for local development
 * - `MemoryMailer` captures messages in memory and can be told to fail,
 *   which is how the dispatcher and the HTTP tests observe deliveries
 */

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::shared::config::MailConfig;

/// Rendered message ready for a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("delivery rejected: {0}")]
    Rejected(String),
}

/// Delivers rendered emails
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

/// SMTP relay transport
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the transport from configuration
    ///
    /// No connection is opened here; lettre connects lazily on first send.
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let from: Mailbox = config.from_address.parse()?;

        let builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
        };
        let builder = builder.port(config.smtp_port);
        let builder = match (&config.smtp_username, &config.smtp_password) {
            (Some(username), Some(password)) => builder.credentials(Credentials::new(
                username.clone(),
                password.expose().to_string(),
            )),
            _ => builder,
        };

        tracing::info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            starttls = config.starttls,
            "SMTP mailer configured"
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(email.to.parse::<Mailbox>()?)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.text_body.clone(),
                email.html_body.clone(),
            ))?;

        let response = self.transport.send(message).await?;
        if !response.is_positive() {
            return Err(MailError::Rejected(format!("{:?}", response.code())));
        }
        Ok(())
    }
}

/// Transport that only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        tracing::info!(to = %email.to, subject = %email.subject, "Mail transport disabled, message logged");
        tracing::debug!(body = %email.text_body, "Logged message body");
        Ok(())
    }
}

/// In-memory transport
#[derive(Debug, Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    failures_remaining: AtomicU32,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the next `failures` sends before accepting any
    pub fn failing(failures: u32) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failures_remaining: AtomicU32::new(failures),
        }
    }

    /// Messages accepted so far
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Wait until at least `count` messages arrived or `timeout` elapsed
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> Vec<OutboundEmail> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let sent = self.sent();
            if sent.len() >= count || tokio::time::Instant::now() >= deadline {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let injected_failure = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected_failure {
            return Err(MailError::Rejected("injected failure".to_string()));
        }

        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(email.clone());
        Ok(())
    }
}
