//! Path filtering for layer contents.
//!
//! The ignore-pattern matcher is an injected capability rather than a
//! concrete type, so alternate matching semantics (dockerignore negation,
//! regex, no-op) can be substituted without touching the tar builder.
//! Filters always see the *relative* path with forward-slash separators,
//! never the absolute source path, so filtering behaves the same wherever
//! the root lives.

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::PackError;

/// Decides whether a relative path belongs in the layer.
///
/// Implementations must be pure functions of the path and the filter's own
/// configuration.
pub trait PathFilter {
    fn accept(&self, relative_path: &str) -> bool;
}

/// Filter that keeps every path. Used when no ignore patterns are supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl PathFilter for AcceptAll {
    fn accept(&self, _relative_path: &str) -> bool {
        true
    }
}

/// Glob-backed ignore filter: a path is excluded when any pattern matches it.
#[derive(Debug, Clone)]
pub struct GlobPathFilter {
    ignored: GlobSet,
}

impl GlobPathFilter {
    /// Compile a set of glob ignore patterns (e.g. `*.log`, `target/**`).
    pub fn new<I, S>(patterns: I) -> Result<Self, PackError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern.as_ref())?);
        }
        Ok(GlobPathFilter {
            ignored: builder.build()?,
        })
    }
}

impl PathFilter for GlobPathFilter {
    fn accept(&self, relative_path: &str) -> bool {
        !self.ignored.is_match(relative_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_all_keeps_everything() {
        assert!(AcceptAll.accept("any/path.txt"));
        assert!(AcceptAll.accept(".hidden"));
    }

    #[test]
    fn glob_filter_excludes_matches() {
        let filter = GlobPathFilter::new(["*.log", "tmp/**"]).unwrap();
        assert!(filter.accept("keep.txt"));
        assert!(!filter.accept("ignore.log"));
        assert!(!filter.accept("tmp/scratch/file"));
        assert!(filter.accept("nested/also.log.txt"));
    }

    #[test]
    fn empty_pattern_set_accepts_everything() {
        let filter = GlobPathFilter::new(Vec::<String>::new()).unwrap();
        assert!(filter.accept("anything"));
    }

    #[test]
    fn invalid_pattern_is_an_input_error() {
        assert!(GlobPathFilter::new(["a{b"]).is_err());
    }
}
