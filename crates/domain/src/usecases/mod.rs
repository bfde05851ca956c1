//! Application use cases / business logic

pub mod group_pass;
pub mod organizer;
pub mod sort_pass;

pub use group_pass::{GroupPass, bucket_by_domain};
pub use organizer::Organizer;
pub use sort_pass::SortPass;

use thiserror::Error;

use crate::model::TabId;

/// Errors that abort a pass
///
/// Per-bucket group failures are absorbed by the grouper and do not surface
/// here; a failed tab move does, by design, leaving the strip partially
/// reordered.
#[derive(Debug, Error)]
pub enum PassError {
    #[error("tab enumeration failed: {0}")]
    Enumerate(String),
    #[error("failed to move tab {id}: {message}")]
    Move { id: TabId, message: String },
}
