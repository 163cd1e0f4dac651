pub mod error;
pub mod serialization;

pub use error::{Error, Result};

/// Bits buffered before a word is handed to the sink.
pub const WORD_BITS: u32 = 32;

/// Width of the length prefix in front of byte buffers, strings and chars.
pub const LENGTH_PREFIX_BITS: u32 = 32;
