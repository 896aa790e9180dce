//! Terminal output helpers
//!
//! Styled with `console` when stdout is an interactive terminal, plain
//! otherwise so command output stays parseable when piped.

mod context;
mod output;

pub use context::UiContext;
pub use output::{key_value, step_ok_detail, step_warn_hint};
