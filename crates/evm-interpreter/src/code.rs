//! Code plane (spec §3.4): immutable bytecode, bounds-checked reads,
//! right-zero-padded `PUSHn` operands.

/// Borrowed, read-only view over the code plane.
pub struct CodeView<'a> {
    bytes: &'a [u8],
}

impl<'a> CodeView<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Byte at `pc`, or `0x00` past the end (bounds-checked read).
    pub fn byte_at(&self, pc: usize) -> u8 {
        self.bytes.get(pc).copied().unwrap_or(0)
    }

    /// True iff `pc` is in range and the byte there is `0x5B` (`JUMPDEST`).
    pub fn is_jumpdest(&self, pc: usize) -> bool {
        self.bytes.get(pc).is_some_and(|&b| b == 0x5B)
    }

    /// Read `n` bytes starting at `pc`, right-zero-padded if `code_size` is
    /// exceeded, right-aligned into a 32-byte word (per `PUSHn`).
    pub fn push_operand(&self, pc: usize, n: usize) -> crate::word::Word {
        let mut word = crate::word::ZERO_WORD;
        let dst_start = 32 - n;
        for i in 0..n {
            word[dst_start + i] = self.byte_at(pc + i);
        }
        word
    }
}
