//! Archive mounting
//!
//! Archives are mounted as read-only filesystems and cached by archive
//! identity so repeated lookups share one open handle.
//!
//! # Lifecycle
//!
//! | Step | Call | Effect |
//! |------|------|--------|
//! | Mount | `MountRegistry::mount` | Open, reuse an equal handle if cached |
//! | Evict | `MountRegistry::close_if` | Close and drop matching handles |
//! | Teardown | `MountRegistry::close_all` | Close every cached handle |

pub mod archive;
pub mod registry;

pub use archive::{ArchiveEntry, MountedArchive};
pub use registry::{Mount, MountRegistry};
