//! Dataset transport: reading and parsing the delimited article table.
//!
//! The engine treats this module as the producer of validated records — the
//! parser turns the text table into raw rows, the loader feeds them to
//! [`crate::engine::RecordStore`]. Retry policy is the caller's concern.

mod loader;
mod parser;

pub use loader::load_dataset;
pub use parser::{parse_table, DEFAULT_DELIMITER};
