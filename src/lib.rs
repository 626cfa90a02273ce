//! Vault identity group export.
//!
//! Lists every namespace of a Vault Enterprise cluster, the identity groups
//! defined in each one, and their policies, and writes the result to a
//! single CSV file for access reviews.
//!
//! ## Modules
//! - `cli` — Command-line entry point
//! - `core` — Vault client, crawl, and CSV exporter
//! - `models` — Response and export data structures
//! - `util` — Target URL handling

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod util;
