//! CLI command implementations

pub mod config;
pub mod hash;
pub mod name;
pub mod resolve;

pub use config::execute as config;
pub use hash::execute as hash;
pub use name::execute as name;
pub use resolve::execute as resolve;
