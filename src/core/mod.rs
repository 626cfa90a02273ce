//! Business logic: Vault reads, the crawl, and the CSV export.

pub mod client;
pub mod crawl;
pub mod error;
pub mod export;
