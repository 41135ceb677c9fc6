//! Result reporting: console text and email.
//!
//! # Submodules
//!
//! - [`text`]: Renders records as `Title: ...` / `Link: ...` lines
//! - [`email`]: The [`email::MailSender`] seam and its SMTP implementation
//! - [`report`]: [`report::Reporter`], which decides where the text goes
//!
//! # Output format
//!
//! ```text
//! Title: Resolución 123/2024
//! Link: https://www.boletinoficial.gob.ar/detalleAviso/primera/123/20240305
//! Title: Decreto 45/2024
//! Link: https://www.boletinoficial.gob.ar/detalleAviso/primera/124/20240305
//! ```

pub mod email;
pub mod report;
pub mod text;
