//! Email senders.
//!
//! - `SmtpEmailSender` delivers through an SMTP relay with STARTTLS or implicit TLS
//! - `LogEmailSender` only logs, for development setups without a relay

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::SmtpConfig;
use crate::kernel::traits::{BaseEmailSender, EmailError};

fn parse_mailbox(address: &str) -> Result<Mailbox, EmailError> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|e| EmailError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// SMTP-backed sender
pub struct SmtpEmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSender {
    pub fn new(config: &SmtpConfig, from: &str) -> Result<Self, EmailError> {
        let builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| EmailError::Transport(format!("SMTP relay error: {}", e)))?
        .port(config.port);

        let builder = match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                builder.credentials(SmtpCredentials::new(username.clone(), password.clone()))
            }
            _ => builder,
        };

        Ok(Self {
            mailer: builder.build(),
            from: parse_mailbox(from)?,
        })
    }

    fn build_message(&self, to: &str, subject: &str, body: &str) -> Result<Message, EmailError> {
        Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(to)?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| EmailError::Build(e.to_string()))
    }
}

#[async_trait]
impl BaseEmailSender for SmtpEmailSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        let message = self.build_message(to, subject, body)?;

        let response = self
            .mailer
            .send(message)
            .await
            .map_err(|e| EmailError::Transport(format!("SMTP send failed: {}", e)))?;

        info!(to = %to, code = %response.code(), "Email sent via SMTP");
        Ok(())
    }
}

/// Sender that logs messages instead of delivering them
#[derive(Debug, Default)]
pub struct LogEmailSender;

#[async_trait]
impl BaseEmailSender for LogEmailSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        parse_mailbox(to)?;
        info!(to = %to, subject = %subject, body = %body, "Email (log only)");
        Ok(())
    }
}
