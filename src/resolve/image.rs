//! Linked runtime image access
//!
//! Runtime-image locations (`jrt:/`) are backed by the `lib/modules` file
//! of a JDK. The image is only opened when bytes are actually read.

use crate::error::{ReslocError, ReslocResult};
use crate::names::SEPARATOR;
use crate::scheme::RuntimeImageInfo;
use ristretto_jimage::Image;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A runtime image file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeImage {
    path: PathBuf,
}

impl RuntimeImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Locate the image of the JDK named by `JAVA_HOME`
    pub fn discover() -> Option<Self> {
        let home = std::env::var_os("JAVA_HOME")?;
        let found = find_in_java_home(Path::new(&home))?;
        debug!("Discovered runtime image {}", found.display());
        Some(Self::new(found))
    }

    /// Path of the image file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a resource out of the image.
    ///
    /// Names are matched by resource path; when a module is given, entries
    /// under that module win over entries elsewhere.
    pub fn read(&self, info: &RuntimeImageInfo) -> ReslocResult<Vec<u8>> {
        let resource = info.resource().trim_start_matches(SEPARATOR);
        if resource.is_empty() {
            return Err(ReslocError::not_a_file());
        }

        let image = Image::from_file(self.path.as_path()).map_err(|e| ReslocError::RuntimeImage {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let mut matcher = ResourceMatcher::new(resource, info.module_name());
        for resource_result in image.iter() {
            match resource_result {
                Ok(entry) => {
                    let name = entry.name().to_string();
                    if let Some(bytes) = matcher.offer(&name, || entry.data().to_vec()) {
                        return Ok(bytes);
                    }
                }
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", self.path.display(), e);
                    matcher.skip(e.to_string());
                }
            }
        }

        matcher.finish(&self.path, info.resource())
    }
}

/// Picks the image entry a resource lookup refers to
struct ResourceMatcher {
    resource: String,
    suffix: String,
    module_prefix: Option<String>,
    fallback: Option<Vec<u8>>,
    skipped: Option<String>,
}

impl ResourceMatcher {
    fn new(resource: &str, module: Option<&str>) -> Self {
        Self {
            resource: resource.to_string(),
            suffix: format!("{}{}", SEPARATOR, resource),
            module_prefix: module.map(|module| format!("{}{}{}", SEPARATOR, module, SEPARATOR)),
            fallback: None,
            skipped: None,
        }
    }

    /// Offer an entry; returns its bytes once the best match is found.
    ///
    /// Entries under the requested module win at once. A name match
    /// elsewhere is kept as a fallback.
    fn offer<D>(&mut self, name: &str, data: D) -> Option<Vec<u8>>
    where
        D: FnOnce() -> Vec<u8>,
    {
        if name != self.resource && !name.ends_with(&self.suffix) {
            return None;
        }

        match self.module_prefix {
            Some(ref prefix) if !name.starts_with(prefix.as_str()) => {
                if self.fallback.is_none() {
                    self.fallback = Some(data());
                }
                None
            }
            _ => Some(data()),
        }
    }

    /// Record an entry that could not be read
    fn skip(&mut self, reason: String) {
        self.skipped.get_or_insert(reason);
    }

    /// Fallback match, or the reason nothing matched.
    ///
    /// Unreadable entries turn a miss into an image error, since the
    /// resource may have been among them.
    fn finish(self, path: &Path, requested: &str) -> ReslocResult<Vec<u8>> {
        match (self.fallback, self.skipped) {
            (Some(bytes), _) => Ok(bytes),
            (None, Some(reason)) => Err(ReslocError::RuntimeImage {
                path: path.to_path_buf(),
                reason,
            }),
            (None, None) => Err(ReslocError::RuntimeImageEntryNotFound(requested.to_string())),
        }
    }
}

fn find_in_java_home(home: &Path) -> Option<PathBuf> {
    let modules = home.join("lib").join("modules");
    if modules.is_file() {
        return Some(modules);
    }

    // Some JRE layouts
    let jre_modules = home.join("jre").join("lib").join("modules");
    if jre_modules.is_file() {
        return Some(jre_modules);
    }

    None
}
