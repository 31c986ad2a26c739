//! Text utilities shared by the dataset layer and the layout engine.
//!
//! - **Display width**: Unicode-aware measurement so the row packer treats
//!   CJK and emoji tags as the two columns they render at.
//! - **Control-char stripping**: dataset cells are untrusted text headed for
//!   a terminal or log line; ANSI escape sequences are removed on ingest.

mod text;

pub use text::{display_width, strip_control_chars};
