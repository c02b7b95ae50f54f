//! Harvest server spec sheets from product pages.
//!
//! rackspec renders a product page in headless Chrome, pulls the visible
//! text of its specifications region, extracts hardware attributes (CPU
//! socket, TDP, memory type, drive bays, ...) with a fixed set of regex
//! rules, stores the result in SQLite keyed by URL, and exports CSV.

pub mod cli;
pub mod config;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod store;

pub use extract::{parse_spec_text, SpecSheet};
pub use fetch::{FetchedPage, PageFetcher};
pub use store::{SpecRecord, SpecStore};
