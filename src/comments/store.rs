//! Append-only comment log backed by a CSV file.
//!
//! The log is a shared resource: several callers may append at once.
//! Every read or append holds the store's mutex (same process) and an
//! exclusive advisory lock on the file (other processes). Appends open
//! the file in append mode and write one record, so the existing
//! contents are never rewritten.

use crate::utils::config::COMMENT_COLUMNS;
use crate::utils::error::CommentError;
use fs4::fs_std::FileExt;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One user comment about an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Event date as entered by the user (free text)
    pub date: String,
    pub cause: String,
    pub comment: String,
}

impl Comment {
    pub fn new(date: impl Into<String>, cause: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            cause: cause.into(),
            comment: comment.into(),
        }
    }
}

/// Handle to the comment log
#[derive(Debug)]
pub struct CommentStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl CommentStore {
    /// Open the log, creating it with the `date,cause,comment` header if absent
    ///
    /// **Public** - main entry point for the comment log
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CommentError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            guard: Mutex::new(()),
        };
        store.ensure_initialized()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one comment
    ///
    /// **Public** - serialized against every other reader and writer
    pub fn append(&self, comment: &Comment) -> Result<(), CommentError> {
        let _held = self.guard.lock().map_err(|_| CommentError::Poisoned)?;

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;
        let locked = LockedFile::acquire(file)?;

        // Another process may have created the file without a header
        let len = locked.file.metadata()?.len();
        if len == 0 {
            write_header(&locked.file)?;
        } else if !ends_with_newline(&locked.file, len)? {
            (&locked.file).write_all(b"\n")?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&locked.file);
        writer.serialize(comment)?;
        writer.flush()?;

        debug!("Appended comment for date '{}'", comment.date);
        Ok(())
    }

    /// Read every comment in insertion order
    ///
    /// **Public** - snapshot of the log
    pub fn read_all(&self) -> Result<Vec<Comment>, CommentError> {
        let _held = self.guard.lock().map_err(|_| CommentError::Poisoned)?;

        let file = File::open(&self.path)?;
        let locked = LockedFile::acquire(file)?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(&locked.file);

        let comments = reader
            .deserialize::<Comment>()
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Read {} comments", comments.len());
        Ok(comments)
    }

    /// Create the file with its header when missing
    ///
    /// **Private** - called once from `open`
    fn ensure_initialized(&self) -> Result<(), CommentError> {
        let _held = self.guard.lock().map_err(|_| CommentError::Poisoned)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let locked = LockedFile::acquire(file)?;

        if locked.file.metadata()?.len() == 0 {
            write_header(&locked.file)?;
            info!("Initialized comment log: {}", self.path.display());
        }

        Ok(())
    }
}

fn write_header(file: &File) -> Result<(), CommentError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.write_record(COMMENT_COLUMNS)?;
    writer.flush()?;
    Ok(())
}

fn ends_with_newline(mut file: &File, len: u64) -> std::io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// A file handle with an exclusive lock. Unlocks on drop.
struct LockedFile {
    file: File,
}

impl LockedFile {
    fn acquire(file: File) -> Result<Self, CommentError> {
        // Blocks until other holders release it
        FileExt::lock_exclusive(&file)?;
        Ok(Self { file })
    }
}

impl Drop for LockedFile {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
