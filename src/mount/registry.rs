//! Registry of mounted archives
//!
//! Mounting an archive is expensive and on some platforms holds a lock on
//! the backing file, so mounted handles are deduplicated by archive
//! identity. The registry lock only guards the handle list; archives are
//! opened and closed outside it.

use crate::error::{ReslocError, ReslocResult};
use crate::mount::archive::MountedArchive;
use crate::scheme::{Identifier, Scheme};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Result of mounting an identifier
#[derive(Debug, Clone)]
pub enum Mount {
    /// Native filesystem; nothing to mount
    Native(PathBuf),
    /// Shared handle to a mounted archive
    Archive(Arc<MountedArchive>),
}

/// Thread-safe set of mounted archive handles
#[derive(Debug, Default)]
pub struct MountRegistry {
    archives: Mutex<Vec<Arc<MountedArchive>>>,
}

impl MountRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount the filesystem an identifier lives in.
    ///
    /// Archive identifiers always open a fresh handle first; when an equal
    /// handle is already cached the fresh one is closed and the cached one
    /// returned. Plain identifiers are never cached.
    pub fn mount(&self, identifier: &Identifier) -> ReslocResult<Mount> {
        match identifier.scheme() {
            Scheme::Plain => Ok(Mount::Native(identifier.native_path()?)),
            Scheme::Archive => {
                let path = identifier.archive_path()?;
                self.mount_archive(MountedArchive::open(&path)?).map(Mount::Archive)
            }
            Scheme::RuntimeImage => Err(ReslocError::UnsupportedScheme(
                Scheme::RuntimeImage.to_string(),
            )),
            Scheme::Unsupported(name) => Err(ReslocError::UnsupportedScheme(name.clone())),
        }
    }

    fn mount_archive(&self, opened: MountedArchive) -> ReslocResult<Arc<MountedArchive>> {
        let cached = {
            let mut archives = self.archives.lock();
            // Handles closed directly by their owners no longer count
            archives.retain(|cached| cached.is_open());

            match archives.iter().find(|cached| ***cached == opened) {
                Some(cached) => Arc::clone(cached),
                None => {
                    let mounted = Arc::new(opened);
                    archives.push(Arc::clone(&mounted));
                    debug!("Mounted archive {}", mounted.path().display());
                    return Ok(mounted);
                }
            }
        };

        opened.close();
        debug!("Reusing mounted archive {}", cached.path().display());
        Ok(cached)
    }

    /// Close and remove every handle matching `predicate`.
    ///
    /// The predicate runs on a snapshot, outside the registry lock, so it may
    /// call back into the registry. Handles mounted concurrently with this
    /// call may or may not be seen.
    pub fn close_if<F>(&self, mut predicate: F)
    where
        F: FnMut(&MountedArchive) -> bool,
    {
        let selected: Vec<Arc<MountedArchive>> = self
            .handles()
            .into_iter()
            .filter(|cached| predicate(cached))
            .collect();
        if selected.is_empty() {
            return;
        }

        self.archives
            .lock()
            .retain(|cached| !selected.iter().any(|chosen| Arc::ptr_eq(chosen, cached)));

        for archive in selected {
            archive.close();
            debug!("Evicted archive {}", archive.path().display());
        }
    }

    /// Close and remove every handle
    pub fn close_all(&self) {
        self.close_if(|_| true);
    }

    /// Number of cached handles
    pub fn len(&self) -> usize {
        self.archives.lock().len()
    }

    /// Whether no handle is cached
    pub fn is_empty(&self) -> bool {
        self.archives.lock().is_empty()
    }

    /// Snapshot of the cached handles
    pub fn handles(&self) -> Vec<Arc<MountedArchive>> {
        self.archives.lock().clone()
    }
}
