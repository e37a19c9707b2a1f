//! Whole-file JSON read/write primitives.
//!
//! # Responsibility
//! - Load one JSON document from disk into a typed value.
//! - Persist one typed value to disk, replacing the previous file.
//! - Emit `store_read` / `store_write` logging events with duration and status.

use super::{StoreError, StoreResult};
use log::{debug, error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Handle to one JSON collection file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the whole file.
    ///
    /// Missing files surface as `StoreError::Io` with `NotFound`; callers that
    /// treat absence as "empty" check `StoreError::is_missing_file`.
    pub fn read<T: DeserializeOwned>(&self) -> StoreResult<T> {
        let started_at = Instant::now();
        debug!(
            "event=store_read module=store status=start file={}",
            self.file_label()
        );

        let result = std::fs::read(&self.path)
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })
            .and_then(|bytes| {
                serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
                    path: self.path.clone(),
                    source,
                })
            });

        match &result {
            Ok(_) => debug!(
                "event=store_read module=store status=ok file={} duration_ms={}",
                self.file_label(),
                started_at.elapsed().as_millis()
            ),
            Err(err) if err.is_missing_file() => debug!(
                "event=store_read module=store status=missing file={} duration_ms={}",
                self.file_label(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_read module=store status=error file={} duration_ms={} error_code={} error={}",
                self.file_label(),
                started_at.elapsed().as_millis(),
                err.code(),
                err
            ),
        }

        result
    }

    /// Serializes `value` and replaces the file with it.
    ///
    /// # Side effects
    /// - Creates the parent directory when absent.
    /// - Writes a sibling temp file, flushes it, then renames it over `path`.
    pub fn write<T: Serialize>(&self, value: &T) -> StoreResult<()> {
        let started_at = Instant::now();

        match self.write_inner(value) {
            Ok(bytes) => {
                info!(
                    "event=store_write module=store status=ok file={} bytes={} duration_ms={}",
                    self.file_label(),
                    bytes,
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_write module=store status=error file={} duration_ms={} error_code={} error={}",
                    self.file_label(),
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }

    fn write_inner<T: Serialize>(&self, value: &T) -> StoreResult<usize> {
        let rendered = serde_json::to_string_pretty(value).map_err(StoreError::Serialize)?;

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent).map_err(|source| self.io_error(source))?;

        let mut temp = NamedTempFile::new_in(&parent).map_err(|source| self.io_error(source))?;
        temp.write_all(rendered.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|source| self.io_error(source))?;
        temp.persist(&self.path)
            .map_err(|err| self.io_error(err.error))?;

        Ok(rendered.len())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    // Logs carry the file name only; data directories can contain user names.
    fn file_label(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
