//! Filesystem metadata helpers.
//!
//! On Unix the permission bits come straight from the file mode. On other
//! platforms there is no POSIX mode to read, so we fall back to the
//! conventional container defaults (`0o644` for files, `0o755` for
//! directories) rather than emitting unusable zero-mode entries.

use std::fs::Metadata;
use std::time::UNIX_EPOCH;

use crate::PackError;

/// POSIX permission bits (owner/group/other rwx) for a file's metadata.
#[cfg(unix)]
pub fn permissions_mode(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o777
}

#[cfg(not(unix))]
pub fn permissions_mode(metadata: &Metadata) -> u32 {
    if metadata.is_dir() {
        0o755
    } else {
        0o644
    }
}

/// Modification time as whole seconds since the Unix epoch.
pub fn modified_secs(metadata: &Metadata) -> Result<u64, PackError> {
    Ok(metadata.modified()?.duration_since(UNIX_EPOCH)?.as_secs())
}
