//! Layer assembly: the public entry points that orchestrate collection, tar
//! emission, compression, and digesting into a [`ContainerLayer`].

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::collect::{self, EntryMap};
use crate::filter::{AcceptAll, GlobPathFilter, PathFilter};
use crate::{archive, compress, digest, PackError};

/// An immutable, content-addressed container layer.
///
/// Constructed once per build and never mutated; safe to cache keyed by
/// [`tar_digest`](ContainerLayer::tar_digest). The serialized form uses the
/// camelCase field names registries and build services exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerLayer {
    /// `"data:"` followed by the base64 encoding of the gzip bytes.
    pub data: String,
    /// `sha256:<hex>` digest of the gzip-compressed tar bytes.
    pub gzip_digest: String,
    /// Byte length of the gzip-compressed tar bytes.
    pub gzip_size: u64,
    /// `sha256:<hex>` digest of the uncompressed tar bytes.
    pub tar_digest: String,
}

/// Stateless layer builder holding only the injected path filter.
///
/// Every build call is self-contained: all buffers and entry maps are local
/// to the call, so one `Packer` may be used from multiple threads without
/// coordination.
///
/// # Example
///
/// ```no_run
/// use layerpack::Packer;
///
/// let layer = Packer::with_ignore_patterns(["*.log", "target/**"])?
///     .layer_from_root("./context")?;
/// # Ok::<(), layerpack::PackError>(())
/// ```
pub struct Packer {
    filter: Box<dyn PathFilter + Send + Sync>,
}

impl Default for Packer {
    /// A packer that keeps every path.
    fn default() -> Self {
        Packer {
            filter: Box::new(AcceptAll),
        }
    }
}

impl Packer {
    /// A packer that excludes relative paths matching any of the given glob
    /// ignore patterns.
    pub fn with_ignore_patterns<I, S>(patterns: I) -> Result<Self, PackError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Packer {
            filter: Box::new(GlobPathFilter::new(patterns)?),
        })
    }

    /// A packer using a caller-supplied filter implementation.
    pub fn with_filter(filter: impl PathFilter + Send + Sync + 'static) -> Self {
        Packer {
            filter: Box::new(filter),
        }
    }

    /// Walk `root`, filter the relative paths, and build the layer.
    pub fn layer_from_root(&self, root: impl AsRef<Path>) -> Result<ContainerLayer, PackError> {
        let entries = collect::entries_from_root(root.as_ref(), self.filter.as_ref())?;
        self.layer_from_entries(&entries)
    }

    /// Filter a caller-provided file list (relativized against `root`)
    /// instead of walking the filesystem.
    pub fn layer_from_files(
        &self,
        root: impl AsRef<Path>,
        files: &[PathBuf],
    ) -> Result<ContainerLayer, PackError> {
        let entries = collect::entries_from_files(root.as_ref(), files, self.filter.as_ref())?;
        self.layer_from_entries(&entries)
    }

    /// Build a layer from an exact entry mapping. No filtering is applied;
    /// the caller has already resolved the entry set.
    pub fn layer_from_entries(&self, entries: &EntryMap) -> Result<ContainerLayer, PackError> {
        let tar_bytes = archive::write_tar(entries, Vec::new())?;
        let tar_digest = digest::digest(&tar_bytes);

        let gzip_bytes = compress::gzip(tar_bytes.as_slice(), Vec::new())?;
        let gzip_digest = digest::digest(&gzip_bytes);
        let gzip_size = gzip_bytes.len() as u64;

        let data = format!("data:{}", BASE64.encode(&gzip_bytes));

        Ok(ContainerLayer {
            data,
            gzip_digest,
            gzip_size,
            tar_digest,
        })
    }
}
