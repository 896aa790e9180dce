//! Resolved resource locations

use crate::error::{ReslocError, ReslocResult};
use crate::mount::MountedArchive;
use crate::names::{NamedResource, SEPARATOR};
use crate::resolve::image::RuntimeImage;
use crate::scheme::RuntimeImageInfo;
use std::fmt;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::sync::Arc;

/// A concrete, addressable location.
///
/// Archive locations share the mounted handle they point into and are
/// only readable while that handle stays open.
#[derive(Debug, Clone)]
pub enum ResolvedLocation {
    /// Path on the native filesystem
    Native(PathBuf),

    /// Entry inside a mounted archive
    Archive {
        archive: Arc<MountedArchive>,
        entry: String,
    },

    /// Entry inside a linked runtime image
    RuntimeImage {
        /// Canonical `jrt:/` URI
        uri: String,
        info: RuntimeImageInfo,
        image: Option<Arc<RuntimeImage>>,
    },
}

impl ResolvedLocation {
    /// Short name of the location kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Native(_) => "native",
            Self::Archive { .. } => "archive",
            Self::RuntimeImage { .. } => "runtime-image",
        }
    }

    /// Stream the location's bytes through `read`.
    ///
    /// Native files and archive entries are read incrementally. Archive
    /// entries keep their handle locked until `read` returns.
    pub fn with_reader<T, F>(&self, read: F) -> ReslocResult<T>
    where
        F: FnOnce(&mut dyn Read) -> ReslocResult<T>,
    {
        match self {
            Self::Native(path) => {
                let mut file = File::open(path)
                    .map_err(|e| ReslocError::io(format!("opening {}", path.display()), e))?;
                read(&mut file)
            }
            Self::Archive { archive, entry } => archive.with_entry_reader(entry, read),
            Self::RuntimeImage { info, image, .. } => {
                let image = image.as_ref().ok_or(ReslocError::RuntimeImageNotFound)?;
                read(&mut Cursor::new(image.read(info)?))
            }
        }
    }

    /// Open the location as an owned stream.
    ///
    /// Archive and runtime-image entries are buffered in full; prefer
    /// [`with_reader`](Self::with_reader) for large entries.
    pub fn open(&self) -> ReslocResult<Box<dyn Read>> {
        match self {
            Self::Native(path) => {
                let file = File::open(path)
                    .map_err(|e| ReslocError::io(format!("opening {}", path.display()), e))?;
                Ok(Box::new(file))
            }
            Self::Archive { archive, entry } => Ok(Box::new(Cursor::new(archive.read(entry)?))),
            Self::RuntimeImage { .. } => {
                let bytes = self.with_reader(|reader| {
                    let mut bytes = Vec::new();
                    reader
                        .read_to_end(&mut bytes)
                        .map_err(|e| ReslocError::io("buffering runtime image entry", e))?;
                    Ok(bytes)
                })?;
                Ok(Box::new(Cursor::new(bytes)))
            }
        }
    }
}

impl fmt::Display for ResolvedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(path) => write!(f, "{}", path.display()),
            Self::Archive { archive, entry } => {
                write!(f, "{}!{}", archive.path().display(), entry)
            }
            Self::RuntimeImage { uri, .. } => write!(f, "{}", uri),
        }
    }
}

impl NamedResource for ResolvedLocation {
    fn raw_name(&self) -> String {
        match self {
            Self::Native(path) => path.raw_name(),
            Self::Archive { entry, .. } => entry.clone(),
            Self::RuntimeImage { info, .. } => match info.module_name() {
                Some(module) if info.resource().trim().is_empty() => module.to_string(),
                _ => info.resource().to_string(),
            },
        }
    }

    /// Archive entries that cannot be looked up (closed handle, missing
    /// entry) fall back to the trailing-separator convention; use
    /// `MountedArchive::entry` to see the error itself.
    fn is_directory(&self) -> bool {
        match self {
            Self::Native(path) => path.is_dir(),
            Self::Archive { archive, entry } => archive
                .entry(entry)
                .map(|found| found.is_directory)
                .unwrap_or_else(|_| entry.ends_with(SEPARATOR)),
            Self::RuntimeImage { info, .. } => info.resource().trim().is_empty(),
        }
    }
}
