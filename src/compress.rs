//! Gzip framing.
//!
//! A single-pass transform from a source stream to a gzip-framed sink, with
//! no content inspection and no dictionary reuse. The gzip header's mtime is
//! pinned to 0 and no filename field is emitted, so the frame adds no host
//! state of its own on top of the payload bytes.

use std::io::{self, Read, Write};

use flate2::{Compression, GzBuilder};

use crate::PackError;

/// Compress `source` into `sink`, returning the sink after the gzip stream
/// has been fully finished and flushed.
pub fn gzip<R: Read, W: Write>(mut source: R, sink: W) -> Result<W, PackError> {
    let mut encoder = GzBuilder::new().mtime(0).write(sink, Compression::default());
    io::copy(&mut source, &mut encoder)?;
    let mut sink = encoder.finish()?;
    sink.flush()?;
    Ok(sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;

    #[test]
    fn gzip_round_trips() {
        let payload = b"layer bytes".as_slice();
        let compressed = gzip(payload, Vec::new()).unwrap();

        let mut decoded = Vec::new();
        GzDecoder::new(compressed.as_slice())
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn gzip_output_is_stable_across_calls() {
        let payload = b"same bytes in, same bytes out".as_slice();
        let a = gzip(payload, Vec::new()).unwrap();
        let b = gzip(payload, Vec::new()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn gzip_header_mtime_is_zeroed() {
        let compressed = gzip(b"x".as_slice(), Vec::new()).unwrap();
        // Bytes 4..8 of the gzip header are the little-endian MTIME field.
        assert_eq!(&compressed[4..8], &[0, 0, 0, 0]);
    }
}
