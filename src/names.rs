//! Name and extension parsing
//!
//! Pure string helpers that answer basename and extension questions for
//! any location string, plus the [`NamedResource`] trait used to ask the
//! same questions of structured resources (native paths, archive entries,
//! resolved locations) that know whether they are directories.

use crate::error::{ReslocError, ReslocResult};
use std::path::{Path, PathBuf};

/// Character separating a file name from its extensions
pub const EXTENSION_IDENTIFIER: char = '.';

/// Canonical path separator
pub const SEPARATOR: char = '/';

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Return the last segment of a location.
///
/// Runs of `/` and `\` collapse into a single `/`, surrounding whitespace
/// is trimmed and trailing separators are dropped before the segment after
/// the last separator is taken.
pub fn without_separators(location: &str) -> String {
    let mut collapsed = String::with_capacity(location.len());
    for c in location.chars() {
        if is_separator(c) {
            if !collapsed.ends_with(SEPARATOR) {
                collapsed.push(SEPARATOR);
            }
        } else {
            collapsed.push(c);
        }
    }

    let clean = collapsed.trim().trim_end_matches(SEPARATOR);
    match clean.rfind(SEPARATOR) {
        Some(idx) => clean[idx + 1..].to_string(),
        None => clean.to_string(),
    }
}

/// Basename of a location.
///
/// Directories are returned as-is. With `partial` set, the name is cut at
/// the first extension identifier.
pub fn basename(location: &str, is_directory: bool, partial: bool) -> String {
    let name = without_separators(location);
    if is_directory || !partial {
        return name;
    }

    match name.find(EXTENSION_IDENTIFIER) {
        Some(idx) => name[..idx].to_string(),
        None => name,
    }
}

/// All extensions of a location in the order they appear.
///
/// `"/opt/info/example.local.txt"` yields `["local", "txt"]`.
pub fn extensions(location: &str) -> Vec<String> {
    let stem = basename(location, false, true);
    let name = without_separators(location);

    if !name.contains(EXTENSION_IDENTIFIER) {
        return Vec::new();
    }

    // Hidden file without further dots: ".bashrc" has no extension
    if let Some(rest) = name.strip_prefix(EXTENSION_IDENTIFIER) {
        if !rest.contains(EXTENSION_IDENTIFIER) {
            return Vec::new();
        }
    }

    let mut pieces: Vec<&str> = name.split(EXTENSION_IDENTIFIER).collect();
    while pieces.last().is_some_and(|piece| piece.is_empty()) {
        pieces.pop();
    }

    pieces
        .into_iter()
        .filter(|piece| *piece != stem)
        .map(str::to_string)
        .collect()
}

/// Last extension of a location, if any
pub fn extension(location: &str) -> Option<String> {
    extensions(location).pop()
}

/// A resource that knows its own name and whether it is a directory
pub trait NamedResource {
    /// Name as reported by the resource itself
    fn raw_name(&self) -> String;

    /// Whether the resource is a directory
    fn is_directory(&self) -> bool;
}

impl NamedResource for Path {
    fn raw_name(&self) -> String {
        match self.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => self.to_string_lossy().into_owned(),
        }
    }

    fn is_directory(&self) -> bool {
        self.is_dir()
    }
}

impl NamedResource for PathBuf {
    fn raw_name(&self) -> String {
        self.as_path().raw_name()
    }

    fn is_directory(&self) -> bool {
        self.as_path().is_directory()
    }
}

/// Basename of a structured resource; directories short-circuit
pub fn basename_of<R: NamedResource + ?Sized>(resource: &R, partial: bool) -> String {
    basename(&resource.raw_name(), resource.is_directory(), partial)
}

/// Extensions of a structured resource. Directories are rejected.
pub fn extensions_of<R: NamedResource + ?Sized>(resource: &R) -> ReslocResult<Vec<String>> {
    if resource.is_directory() {
        return Err(ReslocError::not_a_file());
    }
    Ok(extensions(&resource.raw_name()))
}

/// Last extension of a structured resource. Directories are rejected.
pub fn extension_of<R: NamedResource + ?Sized>(resource: &R) -> ReslocResult<Option<String>> {
    if resource.is_directory() {
        return Err(ReslocError::not_a_file());
    }
    Ok(extension(&resource.raw_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = "/opt/info/example.local.txt";

    #[test]
    fn without_separators_takes_last_segment() {
        assert_eq!(without_separators(SAMPLE), "example.local.txt");
        assert_eq!(without_separators("plain"), "plain");
        assert_eq!(without_separators(""), "");
    }

    #[test]
    fn without_separators_collapses_mixed_separators() {
        assert_eq!(without_separators("C:\\\\data//\\reports\\q1.csv"), "q1.csv");
        assert_eq!(without_separators("  /var/log/  "), "log");
        assert_eq!(without_separators("a/b///"), "b");
        assert_eq!(without_separators("///"), "");
    }

    #[test]
    fn basename_partial_and_full() {
        assert_eq!(basename(SAMPLE, false, true), "example");
        assert_eq!(basename(SAMPLE, false, false), "example.local.txt");
    }

    #[test]
    fn basename_of_directory_keeps_dots() {
        assert_eq!(basename("/srv/site.d/", true, true), "site.d");
        assert_eq!(basename("/srv/site.d", true, false), "site.d");
    }

    #[test]
    fn extensions_in_order() {
        assert_eq!(extensions(SAMPLE), vec!["local", "txt"]);
        assert_eq!(extension(SAMPLE), Some("txt".to_string()));
    }

    #[test]
    fn no_extension_identifier() {
        assert!(extensions("/usr/bin/env").is_empty());
        assert_eq!(extension("/usr/bin/env"), None);
        assert_eq!(basename("/usr/bin/env", false, true), "env");
    }

    #[test]
    fn hidden_file_has_no_extension() {
        assert!(extensions("/home/user/.bashrc").is_empty());
        assert_eq!(extension(".profile"), None);
    }

    #[test]
    fn hidden_file_with_extension() {
        assert_eq!(extensions("/home/user/.config.toml"), vec!["config", "toml"]);
    }

    #[test]
    fn trailing_dots_are_dropped() {
        assert_eq!(extensions("archive.tar."), vec!["tar"]);
        assert!(extensions("notes.").is_empty());
    }

    #[test]
    fn extension_only_considers_last_segment() {
        assert!(extensions("/opt/app.d/run").is_empty());
        assert_eq!(extensions("lib\\native.so.1"), vec!["so", "1"]);
    }

    #[test]
    fn partial_basename_is_prefix_of_full() {
        for location in [SAMPLE, "/usr/bin/env", "a.b", "x/y/z.tar.gz", "dir/"] {
            let partial = basename(location, false, true);
            let full = basename(location, false, false);
            assert!(full.starts_with(&partial), "{location}");
            assert_eq!(partial == full, extensions(location).is_empty(), "{location}");
        }
    }

    #[test]
    fn path_overloads_query_filesystem() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("report.final.pdf");
        fs::write(&file, b"%PDF").unwrap();

        assert_eq!(basename_of(&file, true), "report");
        assert_eq!(basename_of(file.as_path(), false), "report.final.pdf");
        assert_eq!(extensions_of(&file).unwrap(), vec!["final", "pdf"]);
        assert_eq!(extension_of(&file).unwrap(), Some("pdf".to_string()));
    }

    #[test]
    fn path_overloads_reject_directories() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("bundle.app");
        fs::create_dir(&sub).unwrap();

        assert_eq!(basename_of(&sub, true), "bundle.app");
        assert!(matches!(
            extensions_of(&sub),
            Err(ReslocError::TypeMismatch { .. })
        ));
        assert!(matches!(
            extension_of(&sub),
            Err(ReslocError::TypeMismatch { .. })
        ));
    }
}
