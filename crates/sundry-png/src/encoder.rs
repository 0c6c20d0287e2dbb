//! PNG container encoding.
//!
//! Only one image shape is produced: 8-bit truecolor (colour type 2), no
//! interlacing, every scanline with filter type 0, and a single IDAT chunk
//! compressed at zlib level 9.
//!
//! A chunk is framed as
//!
//! ```text
//! +--------+------+-------+--------+
//! | length | type | data  | CRC-32 |
//! | u32 BE | 4 B  | n B   | u32 BE |
//! +--------+------+-------+--------+
//! ```
//!
//! where the CRC covers `type ++ data`.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::{Compression, Crc};

use crate::canvas::Rgb;
use crate::{Error, Result};

/// The 8-byte PNG file signature.
pub const SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// zlib level used for IDAT.
pub const COMPRESSION_LEVEL: u32 = 9;

const BIT_DEPTH: u8 = 8;
const COLOR_TYPE_RGB: u8 = 2;

/// CRC-32 (ISO-HDLC) of a chunk's type and data.
pub fn chunk_crc(kind: &[u8; 4], data: &[u8]) -> u32 {
    let mut crc = Crc::new();
    crc.update(kind);
    crc.update(data);
    crc.sum()
}

/// Frame `data` as a PNG chunk of the given type.
pub fn chunk(kind: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 12);
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&chunk_crc(kind, data).to_be_bytes());
    out
}

fn ihdr(width: u32, height: u32) -> [u8; 13] {
    let mut data = [0u8; 13];
    data[0..4].copy_from_slice(&width.to_be_bytes());
    data[4..8].copy_from_slice(&height.to_be_bytes());
    data[8] = BIT_DEPTH;
    data[9] = COLOR_TYPE_RGB;
    // compression, filter, interlace methods are all 0
    data
}

/// Raw (pre-compression) scanlines: a 0 filter byte then `RGB` triples.
pub fn scanlines(width: usize, pixels: &[Rgb]) -> Vec<u8> {
    let mut raw = Vec::with_capacity(pixels.len() * 3 + pixels.len() / width.max(1));
    for row in pixels.chunks(width.max(1)) {
        raw.push(0);
        for Rgb(r, g, b) in row {
            raw.extend_from_slice(&[*r, *g, *b]);
        }
    }
    raw
}

/// Encode row-major RGB pixels as a PNG byte stream.
pub fn encode_rgb(width: usize, height: usize, pixels: &[Rgb]) -> Result<Vec<u8>> {
    if width == 0 || height == 0 || width > u32::MAX as usize || height > u32::MAX as usize {
        return Err(Error::Dimensions { width, height });
    }
    let expected = width * height;
    if pixels.len() != expected {
        return Err(Error::PixelCount {
            expected,
            actual: pixels.len(),
        });
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(COMPRESSION_LEVEL));
    encoder
        .write_all(&scanlines(width, pixels))
        .map_err(Error::Compression)?;
    let compressed = encoder.finish().map_err(Error::Compression)?;

    let mut png = Vec::with_capacity(compressed.len() + 64);
    png.extend_from_slice(SIGNATURE);
    png.extend(chunk(b"IHDR", &ihdr(width as u32, height as u32)));
    png.extend(chunk(b"IDAT", &compressed));
    png.extend(chunk(b"IEND", &[]));
    Ok(png)
}

/// Split a PNG byte stream into `(type, data)` chunks, verifying each CRC.
///
/// Returns `None` when the signature, framing, or any CRC is wrong.
pub fn read_chunks(png: &[u8]) -> Option<Vec<([u8; 4], Vec<u8>)>> {
    let mut rest = png.strip_prefix(SIGNATURE.as_slice())?;
    let mut chunks = Vec::new();
    while !rest.is_empty() {
        if rest.len() < 12 {
            return None;
        }
        let len = u32::from_be_bytes(rest[0..4].try_into().ok()?) as usize;
        if rest.len() < 12 + len {
            return None;
        }
        let kind: [u8; 4] = rest[4..8].try_into().ok()?;
        let data = &rest[8..8 + len];
        let crc = u32::from_be_bytes(rest[8 + len..12 + len].try_into().ok()?);
        if crc != chunk_crc(&kind, data) {
            return None;
        }
        chunks.push((kind, data.to_vec()));
        rest = &rest[12 + len..];
    }
    Some(chunks)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use proptest::prelude::*;
    use std::io::Read;

    fn inflate(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        ZlibDecoder::new(data).read_to_end(&mut out).unwrap();
        out
    }

    // ------------------------------------------------------------------------
    // chunk tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_iend_chunk_bytes() {
        // The IEND chunk is the same in every PNG ever written.
        assert_eq!(
            chunk(b"IEND", &[]),
            vec![0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]
        );
    }

    #[test]
    fn test_chunk_length_prefix() {
        let c = chunk(b"tEXt", b"hello");
        assert_eq!(&c[0..4], &5u32.to_be_bytes());
        assert_eq!(&c[4..8], b"tEXt");
        assert_eq!(&c[8..13], b"hello");
        assert_eq!(c.len(), 17);
    }

    // ------------------------------------------------------------------------
    // encode_rgb tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_encode_single_pixel_structure() {
        let png = encode_rgb(1, 1, &[Rgb(255, 0, 0)]).unwrap();
        assert!(png.starts_with(SIGNATURE));

        let chunks = read_chunks(&png).unwrap();
        let kinds: Vec<&[u8; 4]> = chunks.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![b"IHDR", b"IDAT", b"IEND"]);

        let ihdr = &chunks[0].1;
        assert_eq!(ihdr.len(), 13);
        assert_eq!(&ihdr[0..4], &1u32.to_be_bytes());
        assert_eq!(&ihdr[4..8], &1u32.to_be_bytes());
        assert_eq!(&ihdr[8..13], &[8, 2, 0, 0, 0]);

        assert_eq!(inflate(&chunks[1].1), vec![0, 255, 0, 0]);
    }

    #[test]
    fn test_encode_rows_get_filter_bytes() {
        let pixels = vec![Rgb(1, 2, 3), Rgb(4, 5, 6), Rgb(7, 8, 9), Rgb(10, 11, 12)];
        let png = encode_rgb(2, 2, &pixels).unwrap();
        let chunks = read_chunks(&png).unwrap();
        assert_eq!(
            inflate(&chunks[1].1),
            vec![0, 1, 2, 3, 4, 5, 6, 0, 7, 8, 9, 10, 11, 12]
        );
    }

    #[test]
    fn test_encode_zero_width_rejected() {
        let err = encode_rgb(0, 3, &[]).unwrap_err();
        assert!(matches!(err, Error::Dimensions { width: 0, height: 3 }));
    }

    #[test]
    fn test_encode_pixel_count_mismatch() {
        let err = encode_rgb(2, 2, &[Rgb(0, 0, 0)]).unwrap_err();
        assert!(matches!(
            err,
            Error::PixelCount {
                expected: 4,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_read_chunks_rejects_corruption() {
        let mut png = encode_rgb(2, 1, &[Rgb(9, 9, 9), Rgb(1, 1, 1)]).unwrap();
        let idx = png.len() - 20;
        png[idx] ^= 0xFF;
        assert!(read_chunks(&png).is_none());
    }

    proptest! {
        #[test]
        fn test_idat_inflates_to_scanline_size(w in 1usize..24, h in 1usize..24, seed in any::<u8>()) {
            let pixels: Vec<Rgb> = (0..w * h)
                .map(|i| Rgb(seed.wrapping_add(i as u8), (i % 251) as u8, seed))
                .collect();
            let png = encode_rgb(w, h, &pixels).unwrap();
            let chunks = read_chunks(&png).unwrap();
            prop_assert_eq!(chunks.last().map(|(k, _)| *k), Some(*b"IEND"));
            let raw = inflate(&chunks[1].1);
            prop_assert_eq!(raw.len(), h * (1 + 3 * w));
            prop_assert_eq!(raw, scanlines(w, &pixels));
        }
    }
}
