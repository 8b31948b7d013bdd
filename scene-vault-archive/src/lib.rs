//! Archive member listing, single-member extraction, and content digests.
//!
//! Decompression is delegated to the `zip` crate; this crate only exposes the
//! two operations the catalog needs (list names, extract one member) behind
//! the [`Archiver`] trait so other formats can be plugged in.

pub mod archiver;
pub mod error;
pub mod hasher;

pub use archiver::{Archiver, ZipArchiver, join_listing};
pub use error::ArchiveError;
pub use hasher::{FileDigests, compute_digests, digest_file};
