//! # layerpack
//!
//! This crate builds single, content-addressed, reproducible filesystem
//! layers suitable for inclusion in a layered container image: given a
//! directory subtree (optionally filtered by ignore patterns), it produces a
//! canonical tar archive, gzip-compresses it, and computes digests of both
//! the uncompressed and compressed bytes, packaging the result as an
//! immutable [`ContainerLayer`].
//!
//! The hard requirement is byte-for-byte determinism: two invocations over
//! the same file set (same relative paths, contents, permissions, mtimes)
//! produce an identical archive and identical digests, independent of
//! filesystem iteration order, host OS, or the invoking user. Registries
//! deduplicate layers purely by digest, so any nondeterminism silently
//! defeats caching across builds.
//!
//! ## Key Modules
//!
//! - [`collect`]: Turns a root directory or an explicit file list into the
//!   entry mapping that drives the build.
//! - [`archive`]: Writes the canonical tar stream with normalized headers.
//! - [`compress`]: Wraps a byte stream in a deterministic gzip frame.
//! - [`digest`]: Registry-style `sha256:<hex>` content digests.
//! - [`filter`]: The [`PathFilter`] capability and its glob-backed default.
//! - [`layer`]: The [`Packer`] entry points and the [`ContainerLayer`] value.
//!
//! ## Example
//!
//! ```no_run
//! use layerpack::Packer;
//!
//! let packer = Packer::with_ignore_patterns(["*.log"]).unwrap();
//! let layer = packer.layer_from_root("/path/to/context").unwrap();
//! println!("{} ({} bytes gzipped)", layer.tar_digest, layer.gzip_size);
//! ```

pub mod archive;
pub mod collect;
pub mod compress;
pub mod digest;
pub mod error;
pub mod filter;
pub mod layer;

// Thin filesystem metadata helpers (permission bits, mtimes)
pub mod fsx;

pub use error::PackError;
pub use filter::{AcceptAll, GlobPathFilter, PathFilter};
pub use layer::{ContainerLayer, Packer};
