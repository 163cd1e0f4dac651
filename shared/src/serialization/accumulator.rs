use crate::WORD_BITS;

#[inline]
fn low_bits(value: u32, count: u32) -> u32 {
    debug_assert!((1..=32).contains(&count));
    value & (u32::MAX >> (32 - count))
}

/// One in-progress 32-bit word. Bits are placed left-justified, so the first
/// bit pushed ends up as the most significant bit of the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitAccumulator {
    current: u32,
    free_bits: u8,
}

impl Default for BitAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl BitAccumulator {
    #[inline]
    pub const fn new() -> Self {
        Self {
            current: 0,
            free_bits: WORD_BITS as u8,
        }
    }

    #[inline]
    pub fn free_bits(&self) -> u32 {
        self.free_bits as u32
    }

    #[inline]
    pub fn pending_bits(&self) -> u32 {
        WORD_BITS - self.free_bits()
    }

    #[inline]
    pub fn is_aligned(&self) -> bool {
        self.free_bits() == WORD_BITS
    }

    /// The pending word, unused low bits zeroed.
    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Appends the low `count` bits of `bits`. Returns the word completed by
    /// this push, if any. With `count <= 32` at most one word can complete.
    ///
    /// `count` must already be validated to `1..=32`.
    #[inline]
    pub fn push(&mut self, bits: u32, count: u32) -> Option<u32> {
        debug_assert!((1..=32).contains(&count));

        let bits = low_bits(bits, count);
        let free = self.free_bits();

        if count < free {
            self.current |= bits << (free - count);
            self.free_bits -= count as u8;
            return None;
        }

        // High `free` bits finish this word, the rest starts the next one.
        let rest = count - free;
        let word = self.current | (bits >> rest);

        if rest == 0 {
            self.reset();
        } else {
            self.current = low_bits(bits, rest) << (WORD_BITS - rest);
            self.free_bits = (WORD_BITS - rest) as u8;
        }

        Some(word)
    }

    /// Takes the pending partial word, leaving the accumulator empty.
    /// Returns the word and how many bits of it are in use.
    #[inline]
    pub fn take_partial(&mut self) -> Option<(u32, u32)> {
        if self.is_aligned() {
            return None;
        }
        let taken = (self.current, self.pending_bits());
        self.reset();
        Some(taken)
    }

    #[inline]
    fn reset(&mut self) {
        self.current = 0;
        self.free_bits = WORD_BITS as u8;
    }
}
