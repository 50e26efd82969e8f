//! Entry collection: turning a root directory or an explicit file list into
//! the mapping of archive-relative paths to source paths that drives a build.
//!
//! The mapping is a `BTreeMap` keyed by the relative path, so duplicate keys
//! resolve last-writer-wins and downstream iteration is always in byte-wise
//! lexicographic order, never in filesystem or hash-map order.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::filter::PathFilter;
use crate::PackError;

/// Mapping of POSIX-style relative paths to absolute source paths.
pub type EntryMap = BTreeMap<String, PathBuf>;

/// Walk `root` and collect every regular file beneath it, keeping the paths
/// the supplied filter accepts.
///
/// Symlinks and other special files are skipped. Directories are not
/// enumerated as entries of their own; use an explicit [`EntryMap`] to place
/// directory entries in an archive.
pub fn entries_from_root(root: &Path, filter: &dyn PathFilter) -> Result<EntryMap, PackError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| PackError::io(e.into(), root))?;
        let file_type = entry.file_type();

        if file_type.is_file() {
            files.push(entry.into_path());
        } else if !file_type.is_dir() {
            debug!(path = %entry.path().display(), "skipping non-regular file during walk");
        }
    }

    // Traversal order is not contractually stable across platforms; the
    // BTreeMap re-sorts anyway, but a sorted list keeps filter evaluation
    // (and its debug output) in a stable order too.
    files.sort();

    entries_from_files(root, &files, filter)
}

/// Relativize each caller-supplied path against `root`, apply the filter to
/// the relative path, and key accepted entries into the mapping.
pub fn entries_from_files(
    root: &Path,
    files: &[PathBuf],
    filter: &dyn PathFilter,
) -> Result<EntryMap, PackError> {
    let mut entries = EntryMap::new();

    for path in files {
        let name = relative_name(root, path)?;
        if filter.accept(&name) {
            entries.insert(name, path.clone());
        } else {
            debug!(path = %name, "path excluded by filter");
        }
    }

    Ok(entries)
}

/// Compute the archive-relative name of `path` under `root`, normalized to
/// forward-slash separators.
fn relative_name(root: &Path, path: &Path) -> Result<String, PackError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| PackError::StripPrefix {
            prefix: root.to_path_buf(),
            path: path.to_path_buf(),
        })?;

    let mut name = relative.to_string_lossy().replace('\\', "/");
    if name.is_empty() {
        // `path == root`: a file root relativizes to its own file name.
        name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                PackError::io(
                    io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
                    path,
                )
            })?;
    }
    Ok(name)
}

/// Validate that an explicit mapping key is usable as a tar entry name.
pub(crate) fn check_entry_name(name: &str) -> Result<(), PackError> {
    if name.is_empty() || name.starts_with('/') || Path::new(name).is_absolute() {
        return Err(PackError::NonRelativePath(name.to_string()));
    }
    Ok(())
}

/// Read metadata for a source path, mapping failures to a fatal build error.
pub(crate) fn source_metadata(path: &Path) -> Result<fs::Metadata, PackError> {
    fs::metadata(path).map_err(|e| PackError::io(e, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::AcceptAll;

    #[test]
    fn relative_name_uses_forward_slashes() {
        let root = Path::new("/work/ctx");
        let name = relative_name(root, Path::new("/work/ctx/sub/dir/file.txt")).unwrap();
        assert_eq!(name, "sub/dir/file.txt");
    }

    #[test]
    fn relative_name_outside_root_fails() {
        let root = Path::new("/work/ctx");
        assert!(relative_name(root, Path::new("/elsewhere/file.txt")).is_err());
    }

    #[test]
    fn duplicate_relative_paths_resolve_last_writer_wins() {
        let root = Path::new("/a");
        let files = vec![PathBuf::from("/a/x.txt"), PathBuf::from("/a/x.txt")];
        let entries = entries_from_files(root, &files, &AcceptAll).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["x.txt"], PathBuf::from("/a/x.txt"));
    }

    #[test]
    fn absolute_entry_names_are_rejected() {
        assert!(check_entry_name("/etc/passwd").is_err());
        assert!(check_entry_name("").is_err());
        assert!(check_entry_name("etc/passwd").is_ok());
    }
}
