//! The data-to-view derivation engine.
//!
//! Pure, synchronous logic: an article list goes in, categories, tag
//! frequency tables, size-weighted tag layouts, and filtered/searched result
//! sets come out. No I/O happens here — the dataset transport lives in
//! [`crate::dataset`], history persistence in [`crate::history`].

mod filter;
mod frequency;
mod layout;
mod store;
mod types;
mod view;

pub use filter::{by_category, by_tag, search};
pub use frequency::compute_frequencies;
pub use layout::{is_large, layout, CloudLayout, DeviceClass, DeviceProfile, TagRow};
pub use store::RecordStore;
pub use types::{Article, DataError, RawRow, SearchOutcome, Suggestion, SuggestionKind, TagFrequency};
pub use view::{View, ViewStateMachine};
