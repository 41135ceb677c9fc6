//! Mail configuration.
//!
//! Credentials and the default recipient are explicit inputs: they come from
//! an optional YAML file and can be overridden per run from the command line
//! or `BOLETIN_*` environment variables (see [`crate::cli::Cli`]).
//!
//! ```yaml
//! mail:
//!   smtp_host: smtp.example.com
//!   smtp_port: 587
//!   username: user
//!   password: secret
//!   from: boletin@example.com
//!   default_recipient: someone@example.com
//! ```

use crate::cli::Cli;
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::path::Path;
use tracing::{info, instrument};

/// Recipient used when email is requested without an explicit address.
pub const DEFAULT_RECIPIENT: &str = "someone@example.com";

/// Sender used when neither `from` nor `username` is configured.
pub const DEFAULT_FROM: &str = "boletin@localhost";

fn default_smtp_port() -> u16 {
    587
}

fn default_recipient() -> String {
    DEFAULT_RECIPIENT.to_string()
}

/// Top-level configuration file.
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub mail: MailConfig,
}

/// SMTP settings for the email reporter.
#[derive(Clone, Deserialize)]
pub struct MailConfig {
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: Option<String>,
    #[serde(default = "default_recipient")]
    pub default_recipient: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: default_smtp_port(),
            username: None,
            password: None,
            from: None,
            default_recipient: default_recipient(),
        }
    }
}

// Hand-written so the password never reaches logs.
impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("from", &self.from)
            .field("default_recipient", &self.default_recipient)
            .finish()
    }
}

impl MailConfig {
    /// Sender address: `from`, else the SMTP username, else [`DEFAULT_FROM`].
    pub fn sender(&self) -> &str {
        self.from
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or(DEFAULT_FROM)
    }
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid YAML for this schema.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_yaml::from_str(&raw)?;
        info!("Loaded configuration");
        Ok(config)
    }

    /// Load the file if one was given, otherwise start from defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line / environment overrides on top of file values.
    pub fn with_overrides(mut self, args: &Cli) -> Self {
        let mail = &mut self.mail;
        if let Some(host) = &args.smtp_host {
            mail.smtp_host = Some(host.clone());
        }
        if let Some(port) = args.smtp_port {
            mail.smtp_port = port;
        }
        if let Some(username) = &args.smtp_username {
            mail.username = Some(username.clone());
        }
        if let Some(password) = &args.smtp_password {
            mail.password = Some(password.clone());
        }
        if let Some(from) = &args.mail_from {
            mail.from = Some(from.clone());
        }
        if let Some(recipient) = &args.default_recipient {
            mail.default_recipient = recipient.clone();
        }
        self
    }
}
