//! Core data models for listing entries, filters and requests.

mod entry;
mod filter;
mod request;

pub use entry::Entry;
pub use filter::{FilterError, FilterMode, FilterSpec};
pub use request::{ListingRequest, ALL_FIELDS};
