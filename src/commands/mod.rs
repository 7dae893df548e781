//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod comment;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use analyze::{execute_analyze, validate_args};
pub use comment::{execute_comment_add, execute_comment_list};
pub use models::{AnalyzeArgs, CommentArgs};
pub use utils::{display_schema, display_version, validate_report_file};
