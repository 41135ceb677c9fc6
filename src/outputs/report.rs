//! Routing of the rendered results to the console and/or email.

use super::email::{MailSender, OutgoingMail};
use super::text::format_records;
use crate::models::ArticleRecord;
use std::error::Error;
use std::io::Write;
use tracing::{info, instrument};

/// Decide who receives the email, if anyone.
///
/// An explicit address always wins; `--email` alone falls back to the
/// configured default recipient; neither means no email.
pub fn resolve_recipient(
    email: bool,
    address: Option<&str>,
    default_recipient: &str,
) -> Option<String> {
    match address {
        Some(address) => Some(address.to_string()),
        None if email => Some(default_recipient.to_string()),
        None => None,
    }
}

/// Sends the rendered records where the user asked.
///
/// The mailer and recipient are fixed at construction; [`Reporter::report`]
/// has no effect when `verbose` is false and there is no recipient.
#[derive(Debug)]
pub struct Reporter<M> {
    verbose: bool,
    delivery: Option<(M, String)>,
}

impl<M: MailSender> Reporter<M> {
    /// Console-only reporter.
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            delivery: None,
        }
    }

    /// Also email the results to `recipient` through `mailer`.
    pub fn with_email(mut self, mailer: M, recipient: String) -> Self {
        self.delivery = Some((mailer, recipient));
        self
    }

    /// Write the records to `out` when verbose and email them when a
    /// recipient is set. The email is sent even when there are no records.
    ///
    /// # Errors
    ///
    /// Propagates write failures and mail delivery failures.
    #[instrument(level = "info", skip_all, fields(records = records.len()))]
    pub async fn report<W: Write>(
        &self,
        records: &[ArticleRecord],
        subject: &str,
        out: &mut W,
    ) -> Result<(), Box<dyn Error>> {
        if !self.verbose && self.delivery.is_none() {
            return Ok(());
        }
        let text = format_records(records);

        if self.verbose {
            out.write_all(text.as_bytes())?;
            out.flush()?;
        }

        if let Some((mailer, recipient)) = &self.delivery {
            let mail = OutgoingMail {
                to: recipient.clone(),
                subject: subject.to_string(),
                body: text,
            };
            mailer.send(&mail).await?;
            info!(to = %recipient, "Sent results by email");
        }
        Ok(())
    }
}
