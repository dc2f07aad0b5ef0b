//! Linkreap - reconcile a media source tree against a library of symlinks
//!
//! The destination tree's symlinks are indexed, every source directory holding files is
//! classified as in use or unused, and unused directories are pruned after confirmation.

pub mod classify;
pub mod confirm;
pub mod error;
pub mod index;
pub mod matcher;
pub mod paths;
pub mod prune;
pub mod reconcile;
#[cfg(unix)]
pub mod relink;
pub mod sweep;

pub use error::{LinkreapError, Result};
