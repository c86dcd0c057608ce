//! Decompression of headerless bzip2 payloads.
//!
//! Compressed payloads are bzip2 streams with their 4-byte `BZh1` magic
//! stripped. The magic is put back in front before decoding.

use std::io::{self, Read};

use bzip2::bufread::BzDecoder;

/// Bzip2 stream magic with block size level 1.
pub const BZIP2_MAGIC: &[u8; 4] = b"BZh1";

/// Decompress a bzip2 stream whose magic was left out.
///
/// Decoding stops at the end of the first stream; any trailing bytes are
/// ignored. `size_hint` only pre-sizes the output.
pub fn decompress_headerless(data: &[u8], size_hint: usize) -> io::Result<Vec<u8>> {
    let framed = (&BZIP2_MAGIC[..]).chain(data);
    let mut decoder = BzDecoder::new(framed);

    let mut output = Vec::with_capacity(size_hint);
    decoder.read_to_end(&mut output)?;

    Ok(output)
}

#[cfg(test)]
pub(crate) fn compress_headerless(data: &[u8]) -> Vec<u8> {
    use std::io::Write;

    use bzip2::write::BzEncoder;
    use bzip2::Compression;

    let mut encoder = BzEncoder::new(Vec::new(), Compression::fast());
    encoder.write_all(data).unwrap();
    let stream = encoder.finish().unwrap();

    assert_eq!(&stream[..4], BZIP2_MAGIC);
    stream[4..].to_vec()
}
