//! Email delivery of search results.
//!
//! [`MailSender`] is the narrow seam the reporter talks to; [`SmtpMailer`]
//! implements it over an SMTP relay with `lettre`. Delivery is fire-once: no
//! confirmation beyond the relay's reply and no retry.

use crate::config::MailConfig;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::error::Error;
use std::fmt;
use tracing::{info, instrument};

/// Port that expects implicit TLS rather than STARTTLS.
const SMTPS_PORT: u16 = 465;

/// A composed plain-text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Something that can deliver an [`OutgoingMail`].
pub trait MailSender {
    /// Deliver the message once.
    async fn send(&self, mail: &OutgoingMail) -> Result<(), Box<dyn Error>>;
}

/// SMTP relay client built from [`MailConfig`].
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("from", &self.from.to_string())
            .finish_non_exhaustive()
    }
}

impl SmtpMailer {
    /// Build a mailer from explicit configuration.
    ///
    /// Port 465 uses implicit TLS, any other port STARTTLS. Credentials are
    /// attached only when both username and password are set.
    ///
    /// # Errors
    ///
    /// Fails if no SMTP host is configured, the sender address is invalid,
    /// or the TLS parameters for the host cannot be built.
    pub fn from_config(config: &MailConfig) -> Result<Self, Box<dyn Error>> {
        let host = config
            .smtp_host
            .as_deref()
            .ok_or("email requested but no SMTP host is configured (mail.smtp_host or --smtp-host)")?;
        let from: Mailbox = config.sender().parse()?;

        let builder = if config.smtp_port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
        };
        let mut builder = builder.port(config.smtp_port);
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        info!(host, port = config.smtp_port, from = %from, "SMTP mailer configured");
        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

/// Compose a plain-text message from `from` to `mail.to`.
pub fn compose_message(from: &Mailbox, mail: &OutgoingMail) -> Result<Message, Box<dyn Error>> {
    let to: Mailbox = mail.to.parse()?;
    let message = Message::builder()
        .from(from.clone())
        .to(to)
        .subject(mail.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(mail.body.clone())?;
    Ok(message)
}

impl MailSender for SmtpMailer {
    #[instrument(level = "info", skip_all, fields(to = %mail.to))]
    async fn send(&self, mail: &OutgoingMail) -> Result<(), Box<dyn Error>> {
        let message = compose_message(&self.from, mail)?;
        let response = self.transport.send(message).await?;
        info!(code = %response.code(), "Email accepted by relay");
        Ok(())
    }
}
