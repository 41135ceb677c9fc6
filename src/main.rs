//! # boletin_fetch
//!
//! Searches the Argentine Boletín Oficial for articles matching a term on a
//! given date and reports their titles and links on the console or by email.
//!
//! ## Usage
//!
//! ```sh
//! boletin_fetch -s "Policia Seguridad Aeroportuaria" -d 2024-03-05 -v
//! ```
//!
//! ## Architecture
//!
//! A single linear pipeline, one HTTP request per run:
//! 1. **Query**: Build the search payload from the term and date
//! 2. **Transport**: POST it to the advanced-search endpoint
//! 3. **Extraction**: Pull `(title, link)` records out of the returned HTML
//! 4. **Report**: Print the records and/or email them
//!
//! Any failure along the way ends the run with a non-zero exit status.

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod client;
mod config;
mod models;
mod outputs;
mod query;
mod scrapers;
mod utils;

use cli::Cli;
use client::BulletinClient;
use config::AppConfig;
use models::SearchQuery;
use outputs::email::SmtpMailer;
use outputs::report::{Reporter, resolve_recipient};
use outputs::text::subject_for;
use scrapers::{ArticleExtractor, HtmlItemExtractor};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    // Logs go to stderr; stdout carries the report.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(
        ?args.search,
        ?args.date,
        email = args.email,
        ?args.address,
        verbose = args.verbose,
        "Parsed CLI arguments"
    );

    let config = AppConfig::load(args.config.as_deref())?.with_overrides(&args);
    debug!(mail = ?config.mail, "Effective configuration");

    // ---- Build ----
    let query = SearchQuery::from_input(args.search.as_deref(), args.date.as_deref())?;
    info!(text = %query.text, date = %query.date_from, "Searching bulletin");

    // Bad mail settings fail here, before the request goes out.
    let recipient = resolve_recipient(
        args.email,
        args.address.as_deref(),
        &config.mail.default_recipient,
    );
    let mut reporter = Reporter::new(args.verbose);
    if let Some(recipient) = recipient {
        reporter = reporter.with_email(SmtpMailer::from_config(&config.mail)?, recipient);
    }

    // ---- Send ----
    let client = BulletinClient::new(&args.base_url)?;
    debug!(endpoint = %client.endpoint(), "Posting search");
    let response = client.search(&query).await?;

    // ---- Parse ----
    let extractor = HtmlItemExtractor::boletin(&args.base_url)?;
    let records = extractor.extract(&response.html)?;

    // ---- Report ----
    let mut stdout = std::io::stdout().lock();
    reporter
        .report(&records, &subject_for(&query), &mut stdout)
        .await?;

    let elapsed = start_time.elapsed();
    info!(
        status = response.status,
        records = records.len(),
        reported_results = response.result_count.total(),
        millis = elapsed.as_millis() as u64,
        "Execution complete"
    );

    Ok(())
}
