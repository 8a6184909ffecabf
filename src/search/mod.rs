//! Search fan-out and merge
//!
//! One logical query fans out across the per-type collections concurrently;
//! the raw per-type hit lists are merged by score into a single bounded
//! ranked list.

mod fanout;
mod merge;
mod models;

pub use fanout::SearchCoordinator;
pub use merge::merge;
pub use models::{RawResult, SearchQuery};
