//! Comment command implementations.

use crate::comments::{Comment, CommentStore};
use crate::commands::models::CommentArgs;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Append a comment to the log
///
/// **Public** - `comment add`
pub fn execute_comment_add(args: CommentArgs) -> Result<()> {
    let store = CommentStore::open(&args.store)
        .with_context(|| format!("Failed to open comment log {}", args.store.display()))?;

    let comment = Comment::new(args.date, args.cause, args.comment);
    store.append(&comment).context("Failed to append comment")?;

    info!("✓ Comment saved to: {}", store.path().display());
    Ok(())
}

/// Print every comment in insertion order
///
/// **Public** - `comment list`
pub fn execute_comment_list(store_path: &Path) -> Result<Vec<Comment>> {
    let store = CommentStore::open(store_path)
        .with_context(|| format!("Failed to open comment log {}", store_path.display()))?;

    let comments = store.read_all().context("Failed to read comment log")?;

    if comments.is_empty() {
        println!("No comments yet.");
    }

    for (idx, c) in comments.iter().enumerate() {
        println!("{:>3}. [{}] {} - {}", idx + 1, c.date, c.cause, c.comment);
    }

    Ok(comments)
}
