// Words always travel most significant byte first.

#[inline]
pub fn disassemble(word: u32) -> [u8; 4] {
    word.to_be_bytes()
}

#[inline]
pub fn assemble(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}

/// Number of leading bytes of a word that carry `used_bits` bits.
#[inline]
pub fn occupied_bytes(used_bits: u32) -> usize {
    debug_assert!(used_bits <= 32);
    ((used_bits + 7) / 8) as usize
}
