//! The serialized artifact: a self-describing header followed by the packed
//! payload. All integers are little-endian, fixed-width, so artifacts are
//! portable across platforms.
//!
//! ```text
//! i32              symbol_count
//! repeated symbol_count times:
//!     u8           symbol
//!     u64          frequency
//! u8               valid_bits_in_last_byte   (1..=8)
//! u64              total_bit_count
//! byte[]           packed payload
//! ```

use std::io::{Cursor, Read, Write};

use crate::bits::Packed;
use crate::error::{CodecError, Result};
use crate::freq::{ALPHABET, FrequencyTable};

/// A parsed artifact, payload still borrowed from the input bytes.
#[derive(Debug)]
pub struct Artifact<'a> {
    pub frequencies: FrequencyTable,
    pub valid_bits: u8,
    pub total_bits: u64,
    pub payload: &'a [u8],
}

/// Write the header (entries in ascending symbol order) and the payload.
pub fn serialize(freq: &FrequencyTable, packed: &Packed) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(4 + freq.distinct() * 9 + 9 + packed.bytes.len());

    out.write_all(&(freq.distinct() as i32).to_le_bytes())?;
    for (symbol, count) in freq.nonzero() {
        out.write_all(&[symbol])?;
        out.write_all(&count.to_le_bytes())?;
    }
    out.write_all(&[packed.valid_bits])?;
    out.write_all(&packed.total_bits.to_le_bytes())?;
    out.write_all(&packed.bytes)?;

    Ok(out)
}

/// Parse and validate an artifact. Short reads inside the declared header
/// are `TruncatedHeader`; any structural inconsistency is
/// `MalformedHeader`.
pub fn parse(data: &[u8]) -> Result<Artifact<'_>> {
    let mut cursor = Cursor::new(data);

    let symbol_count = read_i32(&mut cursor)?;
    if !(1..=ALPHABET as i32).contains(&symbol_count) {
        return Err(CodecError::MalformedHeader {
            reason: "symbol count out of range",
        });
    }

    let mut pairs = Vec::with_capacity(symbol_count as usize);
    for _ in 0..symbol_count {
        let symbol = read_u8(&mut cursor)?;
        let count = read_u64(&mut cursor)?;
        pairs.push((symbol, count));
    }
    let frequencies = FrequencyTable::from_pairs(pairs)?;

    let valid_bits = read_u8(&mut cursor)?;
    if !(1..=8).contains(&valid_bits) {
        return Err(CodecError::MalformedHeader {
            reason: "valid bit count out of range",
        });
    }

    let total_bits = read_u64(&mut cursor)?;
    let payload = &data[cursor.position() as usize..];

    if total_bits == 0 {
        return Err(CodecError::MalformedHeader {
            reason: "symbols declared but no payload bits",
        });
    }
    if total_bits > payload.len() as u64 * 8 {
        return Err(CodecError::MalformedHeader {
            reason: "declared bit count exceeds payload",
        });
    }
    let tail = (total_bits % 8) as u8;
    let expected_valid = if tail == 0 { 8 } else { tail };
    if valid_bits != expected_valid {
        return Err(CodecError::MalformedHeader {
            reason: "valid bit count disagrees with total bit count",
        });
    }

    Ok(Artifact {
        frequencies,
        valid_bits,
        total_bits,
        payload,
    })
}

fn read_u8(cursor: &mut Cursor<&[u8]>) -> Result<u8> {
    let mut buf = [0u8; 1];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| CodecError::TruncatedHeader)?;
    Ok(buf[0])
}

fn read_i32(cursor: &mut Cursor<&[u8]>) -> Result<i32> {
    let mut buf = [0u8; 4];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| CodecError::TruncatedHeader)?;
    Ok(i32::from_le_bytes(buf))
}

fn read_u64(cursor: &mut Cursor<&[u8]>) -> Result<u64> {
    let mut buf = [0u8; 8];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| CodecError::TruncatedHeader)?;
    Ok(u64::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_packed() -> Packed {
        // four one-bit codes: 1 1 1 0, padded to one byte
        Packed {
            bytes: vec![0b1110_0000],
            total_bits: 4,
            valid_bits: 4,
        }
    }

    fn sample_artifact() -> Vec<u8> {
        let freq = FrequencyTable::scan(b"aaab");
        serialize(&freq, &sample_packed()).unwrap()
    }

    #[test]
    fn layout_is_exact_and_little_endian() {
        let artifact = sample_artifact();
        let mut expected = Vec::new();
        expected.extend_from_slice(&2i32.to_le_bytes());
        expected.push(b'a');
        expected.extend_from_slice(&3u64.to_le_bytes());
        expected.push(b'b');
        expected.extend_from_slice(&1u64.to_le_bytes());
        expected.push(4); // valid bits in last byte
        expected.extend_from_slice(&4u64.to_le_bytes());
        expected.push(0b1110_0000);
        assert_eq!(artifact, expected);
    }

    #[test]
    fn parse_restores_the_header() {
        let artifact = sample_artifact();
        let parsed = parse(&artifact).unwrap();
        assert_eq!(parsed.frequencies.count(b'a'), 3);
        assert_eq!(parsed.frequencies.count(b'b'), 1);
        assert_eq!(parsed.valid_bits, 4);
        assert_eq!(parsed.total_bits, 4);
        assert_eq!(parsed.payload, &[0b1110_0000]);
    }

    #[test]
    fn header_frequency_sum_matches_input_length() {
        let artifact = sample_artifact();
        let parsed = parse(&artifact).unwrap();
        assert_eq!(parsed.frequencies.total(), 4);
    }

    #[test]
    fn every_header_truncation_is_detected() {
        let artifact = sample_artifact();
        let header_len = artifact.len() - 1; // single payload byte
        for len in 0..header_len {
            assert!(
                matches!(parse(&artifact[..len]), Err(CodecError::TruncatedHeader)),
                "length {len} should truncate the header"
            );
        }
    }

    #[test]
    fn missing_payload_is_malformed() {
        let artifact = sample_artifact();
        let err = parse(&artifact[..artifact.len() - 1]).unwrap_err();
        assert!(matches!(err, CodecError::MalformedHeader { .. }));
    }

    #[test]
    fn negative_symbol_count_is_malformed() {
        let mut artifact = sample_artifact();
        artifact[..4].copy_from_slice(&(-1i32).to_le_bytes());
        assert!(matches!(
            parse(&artifact),
            Err(CodecError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn oversized_symbol_count_is_malformed() {
        let mut artifact = sample_artifact();
        artifact[..4].copy_from_slice(&257i32.to_le_bytes());
        assert!(matches!(
            parse(&artifact),
            Err(CodecError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn zero_valid_bits_is_malformed() {
        let mut artifact = sample_artifact();
        artifact[22] = 0; // valid_bits field, after 4 + 2 * 9 header bytes
        assert!(matches!(
            parse(&artifact),
            Err(CodecError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn inconsistent_valid_bits_is_malformed() {
        let mut artifact = sample_artifact();
        artifact[22] = 7; // total_bit_count says 4 bits occupy the last byte
        assert!(matches!(
            parse(&artifact),
            Err(CodecError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn overdeclared_bit_count_is_malformed() {
        let freq = FrequencyTable::scan(b"aaab");
        let packed = Packed {
            bytes: vec![0b1110_0000],
            total_bits: 16, // two bytes' worth, only one present
            valid_bits: 8,
        };
        let artifact = serialize(&freq, &packed).unwrap();
        assert!(matches!(
            parse(&artifact),
            Err(CodecError::MalformedHeader { .. })
        ));
    }
}
