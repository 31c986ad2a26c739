//! Core engine for a tag-cloud content browser.
//!
//! `cumulus` ingests a delimited text dataset of articles (each tagged with
//! categories and keywords) and derives everything a presentation layer needs
//! to render the two interchangeable views of the browser:
//!
//! - a **weighted tag cloud** (frequency counting + row-packing layout), and
//! - a **filtered article grid** (category filter, tag filter, multi-field
//!   search with suggestions).
//!
//! The crate is deliberately presentation-agnostic: rendering, styling, and
//! measurement live in the consumer. Everything here is recomputed from the
//! immutable [`engine::RecordStore`] on each state change — derived structures
//! are never patched incrementally, which is the core anti-staleness
//! invariant.

pub mod app;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod history;
pub mod scheduler;
pub mod util;

pub use app::Browser;
pub use config::Config;
pub use engine::{Article, DataError, DeviceClass, RecordStore, TagFrequency};
pub use scheduler::UpdateScheduler;
