//! Mounted archive handles
//!
//! A [`MountedArchive`] is an open zip/jar archive viewed as a small
//! read-only filesystem. Handles compare equal when they are backed by the
//! same canonical archive path, regardless of how that path was spelled.

use crate::error::{ReslocError, ReslocResult};
use crate::names::{NamedResource, SEPARATOR};
use parking_lot::Mutex;
use std::fmt;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

/// An open archive treated as a filesystem.
///
/// Entry lookups and reads take the handle's own lock; `is_open` and
/// equality never do, so callers holding other locks can query them freely.
pub struct MountedArchive {
    path: PathBuf,
    open: AtomicBool,
    archive: Mutex<Option<ZipArchive<File>>>,
}

impl MountedArchive {
    /// Open the archive at `path`.
    ///
    /// The path is canonicalized first so that equal archives reached
    /// through different spellings share one identity.
    pub fn open(path: &Path) -> ReslocResult<Self> {
        let canonical = fs::canonicalize(path)
            .map_err(|e| ReslocError::io(format!("locating archive {}", path.display()), e))?;

        let file = File::open(&canonical)
            .map_err(|e| ReslocError::io(format!("opening archive {}", canonical.display()), e))?;

        let archive = ZipArchive::new(file).map_err(|source| ReslocError::ArchiveOpen {
            path: canonical.clone(),
            source,
        })?;

        debug!(
            "Opened archive {} ({} entries)",
            canonical.display(),
            archive.len()
        );
        Ok(Self {
            path: canonical,
            open: AtomicBool::new(true),
            archive: Mutex::new(Some(archive)),
        })
    }

    /// Canonical path of the backing archive
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the handle is still open
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Close the handle. Closing twice is a no-op.
    ///
    /// The handle reports closed at once; the archive itself is released
    /// after any reader still streaming an entry has finished.
    pub fn close(&self) {
        if self.open.swap(false, Ordering::AcqRel) {
            self.archive.lock().take();
            debug!("Closed archive {}", self.path.display());
        }
    }

    fn closed(&self) -> ReslocError {
        ReslocError::ArchiveClosed(self.path.clone())
    }

    /// Look up an entry by path.
    ///
    /// Leading separators are ignored and `/` names the archive root.
    /// Directories without an explicit entry are inferred from their
    /// children.
    pub fn entry(&self, path: &str) -> ReslocResult<ArchiveEntry> {
        let name = normalize_entry(path);
        if name.is_empty() {
            return Ok(ArchiveEntry {
                name: SEPARATOR.to_string(),
                is_directory: true,
                size: 0,
            });
        }

        if !self.is_open() {
            return Err(self.closed());
        }
        let mut guard = self.archive.lock();
        let archive = guard.as_mut().ok_or_else(|| self.closed())?;

        match archive.by_name(name) {
            Ok(file) => {
                return Ok(ArchiveEntry {
                    name: file.name().to_string(),
                    is_directory: file.is_dir(),
                    size: file.size(),
                })
            }
            Err(ZipError::FileNotFound) => {}
            Err(e) => return Err(self.entry_error(name, e)),
        }

        let dir_prefix = format!("{}{}", name.trim_end_matches(SEPARATOR), SEPARATOR);
        if archive
            .file_names()
            .any(|entry| entry.starts_with(&dir_prefix))
        {
            return Ok(ArchiveEntry {
                name: dir_prefix,
                is_directory: true,
                size: 0,
            });
        }

        Err(ReslocError::EntryNotFound {
            archive: self.path.clone(),
            entry: path.to_string(),
        })
    }

    /// Stream a file entry through `read`.
    ///
    /// The entry is decompressed as `read` pulls from it; nothing is
    /// buffered up front. The handle's lock is held until `read` returns, so
    /// `read` must not look up entries of this same handle.
    pub fn with_entry_reader<T, F>(&self, path: &str, read: F) -> ReslocResult<T>
    where
        F: FnOnce(&mut dyn Read) -> ReslocResult<T>,
    {
        let name = normalize_entry(path);
        if !self.is_open() {
            return Err(self.closed());
        }
        let mut guard = self.archive.lock();
        let archive = guard.as_mut().ok_or_else(|| self.closed())?;

        let mut file = archive.by_name(name).map_err(|e| match e {
            ZipError::FileNotFound => ReslocError::EntryNotFound {
                archive: self.path.clone(),
                entry: path.to_string(),
            },
            other => self.entry_error(name, other),
        })?;

        if file.is_dir() {
            return Err(ReslocError::not_a_file());
        }

        read(&mut file)
    }

    /// Read the full contents of a file entry
    pub fn read(&self, path: &str) -> ReslocResult<Vec<u8>> {
        self.with_entry_reader(path, |reader| {
            let mut buffer = Vec::new();
            reader.read_to_end(&mut buffer).map_err(|e| {
                ReslocError::io(
                    format!("reading {} from {}", path, self.path.display()),
                    e,
                )
            })?;
            Ok(buffer)
        })
    }

    fn entry_error(&self, name: &str, source: ZipError) -> ReslocError {
        match source {
            ZipError::Io(e) => ReslocError::io(
                format!("reading {} from {}", name, self.path.display()),
                e,
            ),
            other => ReslocError::ArchiveOpen {
                path: self.path.clone(),
                source: other,
            },
        }
    }
}

fn normalize_entry(path: &str) -> &str {
    path.trim_start_matches(SEPARATOR)
}

impl PartialEq for MountedArchive {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for MountedArchive {}

impl fmt::Debug for MountedArchive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountedArchive")
            .field("path", &self.path)
            .field("open", &self.is_open())
            .finish()
    }
}

/// Metadata of a single archive entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry name as stored in the archive (directories end with `/`)
    pub name: String,
    pub is_directory: bool,
    /// Uncompressed size in bytes
    pub size: u64,
}

impl NamedResource for ArchiveEntry {
    fn raw_name(&self) -> String {
        self.name.clone()
    }

    fn is_directory(&self) -> bool {
        self.is_directory
    }
}
