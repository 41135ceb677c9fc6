//! Command-line interface definitions for boletin_fetch.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Mail settings can also be provided through `BOLETIN_*` environment
//! variables so credentials stay off the command line.

use crate::scrapers::boletin::BASE_URL;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for boletin_fetch.
///
/// # Examples
///
/// ```sh
/// # Print today's matches for the default term
/// boletin_fetch -v
///
/// # Search a term on a given date
/// boletin_fetch -s "Resolución" -d 2024-03-05 -v
///
/// # Email the results to an explicit address
/// BOLETIN_SMTP_PASSWORD=... boletin_fetch -c config.yaml -a team@example.com
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search string in quotes, defaults to "Policia Seguridad Aeroportuaria"
    #[arg(short, long)]
    pub search: Option<String>,

    /// Date to search in ISO format (yyyy-mm-dd), defaults to today's date
    #[arg(short, long)]
    pub date: Option<String>,

    /// Send the results by email to the default recipient
    #[arg(short = 'm', long)]
    pub email: bool,

    /// Send the results by email to this address
    #[arg(short, long)]
    pub address: Option<String>,

    /// Print the results to standard output
    #[arg(short, long)]
    pub verbose: bool,

    /// Optional path to a config.yaml file with mail settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Site origin for the search endpoint and article links
    #[arg(long, env = "BOLETIN_BASE_URL", default_value = BASE_URL)]
    pub base_url: String,

    /// SMTP relay host
    #[arg(long, env = "BOLETIN_SMTP_HOST")]
    pub smtp_host: Option<String>,

    /// SMTP relay port
    #[arg(long, env = "BOLETIN_SMTP_PORT")]
    pub smtp_port: Option<u16>,

    /// SMTP username
    #[arg(long, env = "BOLETIN_SMTP_USERNAME")]
    pub smtp_username: Option<String>,

    /// SMTP password
    #[arg(long, env = "BOLETIN_SMTP_PASSWORD", hide_env_values = true)]
    pub smtp_password: Option<String>,

    /// Sender address for result emails
    #[arg(long, env = "BOLETIN_MAIL_FROM")]
    pub mail_from: Option<String>,

    /// Recipient used by --email when no --address is given
    #[arg(long, env = "BOLETIN_DEFAULT_RECIPIENT")]
    pub default_recipient: Option<String>,
}
