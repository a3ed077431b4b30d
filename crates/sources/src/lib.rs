//! Trusted medical sources for MedTriage.
//!
//! The gatherer queries the search pages of a fixed set of trusted sites
//! (NHS, Mayo Clinic, MedlinePlus by default), keeps the first paragraphs
//! of each page, and optionally condenses them with the language model
//! before they are handed to the triage prompt.

pub mod scrape;
pub mod source;
pub mod summarize;
pub mod web;

pub use source::TrustedSource;
pub use summarize::{Summarizer, compose_source_summary};
pub use web::WebContextGatherer;
