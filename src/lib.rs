//! resloc - resource location toolkit
//!
//! Parses resource names, decodes `file:`, `jar:` and `jrt:/` identifiers,
//! mounts archives once per process and hashes resource contents.

pub mod cli;
pub mod config;
pub mod digest;
pub mod error;
pub mod home;
pub mod mount;
pub mod names;
pub mod resolve;
pub mod scheme;
pub mod ui;

pub use error::{ReslocError, ReslocResult};
