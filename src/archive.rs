//! Canonical tar emission.
//!
//! Every header is normalized so that the archive bytes depend only on the
//! entry set itself: owner/group are always `0`/`root`, the mode field is
//! the standard Unix type bits plus the source file's permission bits, and
//! entries are written in the mapping's byte-wise lexicographic key order.
//! The one piece of host state that survives into the archive is each source
//! file's own modification time, preserved for provenance.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use tar::{Builder, EntryType, Header};

use crate::collect::{check_entry_name, source_metadata, EntryMap};
use crate::{fsx, PackError};

/// Type bits of the tar mode field for directory entries.
pub const DIR_TYPE_BITS: u32 = 0o40000;

/// Type bits of the tar mode field for regular-file entries.
pub const FILE_TYPE_BITS: u32 = 0o100000;

/// Write the entries as a canonical tar stream into `sink`, returning the
/// sink once the end-of-archive trailer has been written and flushed.
///
/// An empty mapping produces a minimal, trailer-only archive.
pub fn write_tar<W: Write>(entries: &EntryMap, sink: W) -> Result<W, PackError> {
    let mut builder = Builder::new(sink);

    // BTreeMap iteration is the sorted order the format requires; it is the
    // single source of truth for entry sequencing.
    for (name, source) in entries {
        check_entry_name(name)?;
        let metadata = source_metadata(source)?;

        let mut header = Header::new_gnu();
        header.set_uid(0);
        header.set_gid(0);
        header
            .set_username("root")
            .map_err(|e| PackError::io(e, source))?;
        header
            .set_groupname("root")
            .map_err(|e| PackError::io(e, source))?;
        header.set_mtime(fsx::modified_secs(&metadata)?);

        let perm = fsx::permissions_mode(&metadata);
        if metadata.is_dir() {
            header.set_entry_type(EntryType::Directory);
            header.set_mode(DIR_TYPE_BITS + perm);
            header.set_size(0);
            builder
                .append_data(&mut header, Path::new(name), io::empty())
                .map_err(|e| PackError::io(e, source))?;
        } else {
            header.set_entry_type(EntryType::Regular);
            header.set_mode(FILE_TYPE_BITS + perm);
            header.set_size(metadata.len());
            let file = File::open(source).map_err(|e| PackError::io(e, source))?;
            builder
                .append_data(&mut header, Path::new(name), file)
                .map_err(|e| PackError::io(e, source))?;
        }
    }

    // Writes the two-zero-block trailer and hands the sink back.
    let mut sink = builder.into_inner()?;
    sink.flush()?;
    Ok(sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn empty_entry_set_yields_trailer_only_archive() {
        let bytes = write_tar(&BTreeMap::new(), Vec::new()).unwrap();
        assert_eq!(bytes, vec![0u8; 1024]);
    }

    #[test]
    fn unreadable_source_aborts_the_build() {
        let mut entries = EntryMap::new();
        entries.insert("gone.txt".into(), "/nonexistent/gone.txt".into());
        assert!(write_tar(&entries, Vec::new()).is_err());
    }

    #[test]
    fn absolute_key_is_rejected() {
        let mut entries = EntryMap::new();
        entries.insert("/abs.txt".into(), "/tmp/abs.txt".into());
        assert!(matches!(
            write_tar(&entries, Vec::new()),
            Err(PackError::NonRelativePath(_))
        ));
    }
}
