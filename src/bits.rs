/// Packed payload plus the bookkeeping the header records: the exact bit
/// count and how many high-order bits of the final byte are real data.
pub struct Packed {
    pub bytes: Vec<u8>,
    pub total_bits: u64,
    pub valid_bits: u8,
}

/// Packs individual bits MSB-first into a byte buffer.
pub struct BitWriter {
    out: Vec<u8>,
    acc: u8,
    held: u8,
}

impl BitWriter {
    pub fn with_capacity(bytes: usize) -> Self {
        BitWriter {
            out: Vec::with_capacity(bytes),
            acc: 0,
            held: 0,
        }
    }

    pub fn push_bit(&mut self, bit: bool) {
        self.acc = (self.acc << 1) | bit as u8;
        self.held += 1;
        if self.held == 8 {
            self.out.push(self.acc);
            self.acc = 0;
            self.held = 0;
        }
    }

    pub fn push_bits(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.push_bit(bit);
        }
    }

    /// Flush any 1-7 held bits, left-aligned, as one final padded byte.
    /// `valid_bits` is only meaningful when at least one bit was pushed.
    pub fn finish(mut self) -> Packed {
        let total_bits = self.out.len() as u64 * 8 + u64::from(self.held);
        let valid_bits = if self.held == 0 { 8 } else { self.held };
        if self.held > 0 {
            self.out.push(self.acc << (8 - self.held));
        }
        Packed {
            bytes: self.out,
            total_bits,
            valid_bits,
        }
    }
}

/// Yields bits MSB-first from a byte slice, up to an exact bit limit.
/// Anything past the limit is padding and is never surfaced.
pub struct BitReader<'a> {
    data: &'a [u8],
    cursor: u64,
    limit: u64,
}

impl<'a> BitReader<'a> {
    /// `limit` must not exceed `data.len() * 8`; the container parser
    /// guarantees this before a reader is ever constructed.
    pub fn new(data: &'a [u8], limit: u64) -> Self {
        BitReader {
            data,
            cursor: 0,
            limit,
        }
    }

    pub fn next_bit(&mut self) -> Option<bool> {
        if self.cursor >= self.limit {
            return None;
        }
        let byte = self.data[(self.cursor / 8) as usize];
        let offset = (self.cursor % 8) as u32;
        self.cursor += 1;
        Some((byte >> (7 - offset)) & 1 == 1)
    }
}
