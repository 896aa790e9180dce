//! Identifier resolution
//!
//! Dispatches a parsed identifier by scheme:
//! 1. Plain: native path taken directly from the identifier
//! 2. Archive: mount the archive, then address the entry inside it
//! 3. Runtime image: decompose and rebuild the canonical `jrt:/` URI
//!
//! Any other scheme is rejected before any archive is touched.

pub mod image;
pub mod location;

pub use image::RuntimeImage;
pub use location::ResolvedLocation;

use crate::error::{ReslocError, ReslocResult};
use crate::mount::{Mount, MountRegistry};
use crate::scheme::{
    decompose_archive_location, decompose_runtime_image, reconstruct_runtime_image_uri, Identifier,
    Scheme,
};
use std::sync::Arc;
use tracing::debug;

/// Resolves identifiers to concrete locations
#[derive(Debug, Clone)]
pub struct Resolver {
    mounts: Arc<MountRegistry>,
    runtime_image: Option<Arc<RuntimeImage>>,
}

impl Resolver {
    /// Create a resolver that mounts archives through `mounts`
    pub fn new(mounts: Arc<MountRegistry>) -> Self {
        Self {
            mounts,
            runtime_image: None,
        }
    }

    /// Read runtime-image resources from `image`
    pub fn with_runtime_image(mut self, image: RuntimeImage) -> Self {
        self.runtime_image = Some(Arc::new(image));
        self
    }

    /// Registry archives are mounted through
    pub fn mounts(&self) -> &MountRegistry {
        &self.mounts
    }

    /// Runtime image used for `jrt:` reads, if any
    pub fn runtime_image(&self) -> Option<&RuntimeImage> {
        self.runtime_image.as_deref()
    }

    /// Parse and resolve an identifier
    pub fn resolve(&self, identifier: &str) -> ReslocResult<ResolvedLocation> {
        self.resolve_identifier(&Identifier::parse(identifier)?)
    }

    /// Resolve an already parsed identifier
    pub fn resolve_identifier(&self, identifier: &Identifier) -> ReslocResult<ResolvedLocation> {
        let location = match identifier.scheme() {
            Scheme::Plain => ResolvedLocation::Native(identifier.native_path()?),
            Scheme::Archive => {
                let entry = decompose_archive_location(identifier.as_str());
                match self.mounts.mount(identifier)? {
                    Mount::Archive(archive) => ResolvedLocation::Archive { archive, entry },
                    Mount::Native(path) => ResolvedLocation::Native(path),
                }
            }
            Scheme::RuntimeImage => {
                let info = decompose_runtime_image(identifier.as_str());
                let canonical = Identifier::parse(&reconstruct_runtime_image_uri(&info))?;
                ResolvedLocation::RuntimeImage {
                    uri: canonical.as_str().to_string(),
                    info,
                    image: self.runtime_image.clone(),
                }
            }
            Scheme::Unsupported(name) => return Err(ReslocError::UnsupportedScheme(name.clone())),
        };

        debug!("Resolved {} to {} location {}", identifier, location.kind(), location);
        Ok(location)
    }
}
