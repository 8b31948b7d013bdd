//! Catalog data model, archive content classification, and group name
//! variants.
//!
//! This crate defines the persistent record shape for the file catalog
//! without any database or network dependencies. `scene-vault-db` persists
//! these types and `scene-vault-sync` mutates them.

pub mod classify;
pub mod types;
pub mod variants;

pub use classify::{Candidate, Classification, classify, find_launcher, find_readme};
pub use types::*;
pub use variants::{group_variants, record_variants};
