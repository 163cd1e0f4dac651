use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("bit count {count} is outside 1..=32")]
    BitCountOutOfRange { count: u32 },

    #[error("range {offset}+{count} does not fit in a buffer of {len} bytes")]
    RangeOutOfBounds { offset: usize, count: usize, len: usize },

    #[error("length {len} does not fit in a 32-bit length prefix")]
    LengthOverflow { len: usize },

    #[error("lone surrogate {unit:#06X} cannot be encoded on its own")]
    InvalidChar { unit: u16 },

    #[error("{ch:?} cannot be represented in {encoding}")]
    Unencodable { ch: char, encoding: &'static str },

    #[error("decimal mantissa {mantissa} or scale {scale} out of range")]
    DecimalOutOfRange { mantissa: i128, scale: u32 },

    #[error("write after the bit writer was closed")]
    Closed,

    #[error(transparent)]
    Io(#[from] io::Error),
}
