//! User home directory helper

use crate::error::{ReslocError, ReslocResult};
use std::path::PathBuf;

/// Home directory joined with each of `parts` in order
pub fn user_directory<I, P>(parts: I) -> ReslocResult<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<std::path::Path>,
{
    let home = dirs::home_dir()
        .ok_or_else(|| ReslocError::invalid_argument("home directory could not be determined"))?;

    Ok(parts
        .into_iter()
        .fold(home, |path, part| path.join(part)))
}
