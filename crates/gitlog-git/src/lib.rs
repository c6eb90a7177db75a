//! gitlog Git - Git history access for changelog generation
//!
//! This crate provides repository discovery, the tag index, the lazy history
//! walk and the tree/diff queries used by commit filters.

mod diff;
mod history;
mod repository;
mod tags;
pub mod types;

pub use history::{History, WalkStats};
pub use repository::{GitRepo, Result};
pub use tags::TagIndex;
pub use types::{CommitInfo, Identity, TagInfo};
