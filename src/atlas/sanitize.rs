//! PNG chunk sanitization.
//!
//! Sprite art fetched from the wild frequently carries ancillary chunks
//! with broken checksums (iCCP is the usual offender), which strict
//! decoders reject. This pass rebuilds the byte stream keeping only
//! critical chunks and checksum-safe ancillary chunks, without decoding
//! any pixel data.

use byteorder::{BigEndian, ByteOrder};
use std::borrow::Cow;

/// Standard PNG file signature.
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Chunk types preserved by sanitization: the critical set plus
/// ancillary chunks that never carry fragile metadata.
const SAFE_CHUNKS: [[u8; 4]; 7] = [
    *b"IHDR", *b"PLTE", *b"IDAT", *b"IEND", *b"tRNS", *b"bKGD", *b"pHYs",
];

/// Length + type + CRC bytes surrounding each chunk's data.
const CHUNK_OVERHEAD: usize = 12;

/// Strip unsafe ancillary chunks from a PNG byte stream.
///
/// Non-PNG input is passed through unchanged (borrowed). For PNG input,
/// chunks are copied verbatim when whitelisted and dropped otherwise;
/// the walk stops at IEND. A truncated chunk header or a length running
/// past the buffer ends the walk, returning whatever was salvaged so the
/// decoder can still attempt the image.
pub fn clean_png(data: &[u8]) -> Cow<'_, [u8]> {
    if data.len() < PNG_SIGNATURE.len() || data[..8] != PNG_SIGNATURE {
        return Cow::Borrowed(data);
    }

    let mut clean = Vec::with_capacity(data.len());
    clean.extend_from_slice(&data[..8]);

    let mut pos = 8;
    while pos + 8 <= data.len() {
        let chunk_len = BigEndian::read_u32(&data[pos..pos + 4]) as usize;
        let Some(chunk_end) = pos.checked_add(CHUNK_OVERHEAD + chunk_len) else {
            break;
        };
        if chunk_end > data.len() {
            break;
        }

        let chunk_type = &data[pos + 4..pos + 8];
        if SAFE_CHUNKS.iter().any(|safe| chunk_type == safe) {
            clean.extend_from_slice(&data[pos..chunk_end]);
        }

        pos = chunk_end;
        if chunk_type == b"IEND" {
            break;
        }
    }

    Cow::Owned(clean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;

    /// Assemble a chunk with a dummy CRC; sanitization never validates
    /// checksums, only copies bytes.
    fn chunk(chunk_type: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.write_u32::<BigEndian>(payload.len() as u32).unwrap();
        out.extend_from_slice(chunk_type);
        out.extend_from_slice(payload);
        out.write_u32::<BigEndian>(0xDEAD_BEEF).unwrap();
        out
    }

    fn png_with_chunks(chunks: &[Vec<u8>]) -> Vec<u8> {
        let mut out = PNG_SIGNATURE.to_vec();
        for c in chunks {
            out.extend_from_slice(c);
        }
        out
    }

    #[test]
    fn test_non_png_passes_through() {
        let data = b"definitely not a png".to_vec();
        let out = clean_png(&data);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out.as_ref(), data.as_slice());
    }

    #[test]
    fn test_strips_iccp_keeps_critical() {
        let data = png_with_chunks(&[
            chunk(b"IHDR", &[0; 13]),
            chunk(b"iCCP", b"broken profile"),
            chunk(b"IDAT", &[1, 2, 3]),
            chunk(b"IEND", &[]),
        ]);
        let expected = png_with_chunks(&[
            chunk(b"IHDR", &[0; 13]),
            chunk(b"IDAT", &[1, 2, 3]),
            chunk(b"IEND", &[]),
        ]);

        assert_eq!(clean_png(&data).as_ref(), expected.as_slice());
    }

    #[test]
    fn test_keeps_safe_ancillary() {
        let data = png_with_chunks(&[
            chunk(b"IHDR", &[0; 13]),
            chunk(b"tRNS", &[0]),
            chunk(b"pHYs", &[0; 9]),
            chunk(b"tEXt", b"comment"),
            chunk(b"IDAT", &[1]),
            chunk(b"IEND", &[]),
        ]);

        let out = clean_png(&data);
        let out = out.as_ref();
        assert!(find_chunk(out, b"tRNS"));
        assert!(find_chunk(out, b"pHYs"));
        assert!(!find_chunk(out, b"tEXt"));
    }

    #[test]
    fn test_truncated_chunk_is_salvaged() {
        let mut data = png_with_chunks(&[chunk(b"IHDR", &[0; 13]), chunk(b"IDAT", &[1, 2, 3])]);
        // Declare a chunk longer than the remaining bytes.
        data.write_u32::<BigEndian>(1000).unwrap();
        data.extend_from_slice(b"IDAT");
        data.extend_from_slice(&[9; 4]);

        let out = clean_png(&data);
        let expected = png_with_chunks(&[chunk(b"IHDR", &[0; 13]), chunk(b"IDAT", &[1, 2, 3])]);
        assert_eq!(out.as_ref(), expected.as_slice());
    }

    #[test]
    fn test_stops_at_iend() {
        let data = png_with_chunks(&[
            chunk(b"IHDR", &[0; 13]),
            chunk(b"IDAT", &[1]),
            chunk(b"IEND", &[]),
            chunk(b"IDAT", b"trailing garbage"),
        ]);

        let expected = png_with_chunks(&[
            chunk(b"IHDR", &[0; 13]),
            chunk(b"IDAT", &[1]),
            chunk(b"IEND", &[]),
        ]);
        assert_eq!(clean_png(&data).as_ref(), expected.as_slice());
    }

    fn find_chunk(data: &[u8], chunk_type: &[u8; 4]) -> bool {
        data.windows(4).any(|w| w == chunk_type)
    }
}
