//! Wire and export data structures.

pub mod group;
pub mod listing;
