//! User comment log.
//!
//! Independent of the analysis pipeline: it never reads the source table
//! and the pipeline never reads it.

pub mod store;

pub use store::{Comment, CommentStore};
