//! The two streaming passes over an in-memory input: encode (frequencies,
//! tree, code table, packed payload, container) and decode (container, tree
//! rebuilt from the stored frequencies, bit walk).

use crate::bits::{BitReader, BitWriter};
use crate::code::CodeTable;
use crate::container;
use crate::error::{CodecError, Result};
use crate::freq::FrequencyTable;
use crate::tree::{self, Node};

/// Compress `input` into a self-describing artifact.
///
/// Empty input is not a failure: it yields the empty artifact, which is the
/// caller-visible signal that there was nothing to encode.
pub fn encode(input: &[u8]) -> Result<Vec<u8>> {
    if input.is_empty() {
        tracing::info!("nothing to encode, emitting an empty artifact");
        return Ok(Vec::new());
    }

    let freq = FrequencyTable::scan(input);
    let root = tree::build(&freq)?.ok_or(CodecError::EmptyHeap)?;
    let table = CodeTable::from_tree(&root)?;

    let mut writer = BitWriter::with_capacity(input.len());
    for &byte in input {
        if let Some(code) = table.get(byte) {
            writer.push_bits(code);
        }
    }
    let packed = writer.finish();

    tracing::debug!(
        distinct = freq.distinct(),
        total_bits = packed.total_bits,
        "payload packed"
    );

    container::serialize(&freq, &packed)
}

/// Decompress an artifact produced by [`encode`] back into the exact
/// original bytes. The empty artifact decodes to empty output.
pub fn decode(artifact: &[u8]) -> Result<Vec<u8>> {
    if artifact.is_empty() {
        return Ok(Vec::new());
    }

    let parts = container::parse(artifact)?;
    tracing::debug!(
        distinct = parts.frequencies.distinct(),
        total_bits = parts.total_bits,
        valid_bits = parts.valid_bits,
        "artifact parsed"
    );
    let root = tree::build(&parts.frequencies)?.ok_or(CodecError::EmptyHeap)?;

    let expected = parts.frequencies.total();
    let mut out = Vec::with_capacity(expected as usize);
    let mut reader = BitReader::new(parts.payload, parts.total_bits);

    if let Node::Leaf { symbol, .. } = &root {
        // One-symbol alphabet: each bit of the degenerate code stands for
        // one occurrence, no tree edge to follow.
        while reader.next_bit().is_some() {
            out.push(*symbol);
        }
    } else {
        let mut cursor = &root;
        while let Some(bit) = reader.next_bit() {
            cursor = match cursor {
                Node::Internal { left, right, .. } => {
                    if bit {
                        right
                    } else {
                        left
                    }
                }
                Node::Leaf { .. } => {
                    return Err(CodecError::MalformedHeader {
                        reason: "walk descended past a leaf",
                    });
                }
            };
            if let Node::Leaf { symbol, .. } = cursor {
                out.push(*symbol);
                cursor = &root;
            }
        }
        if !std::ptr::eq(cursor, &root) {
            return Err(CodecError::MalformedHeader {
                reason: "payload ends in the middle of a code",
            });
        }
    }

    if out.len() as u64 != expected {
        return Err(CodecError::MalformedHeader {
            reason: "decoded length disagrees with stored frequencies",
        });
    }

    tracing::debug!(bytes = out.len(), "payload decoded");
    Ok(out)
}
