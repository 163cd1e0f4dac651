// Values go out most significant bit first, buffered a 32-bit word at a time.
// Decoding lives with the consumers of the stream.

pub mod accumulator;
pub mod bit_writer;
pub mod decimal;
pub mod encode;
pub mod text;
pub mod word;

pub use bit_writer::*;
pub use decimal::Decimal;
pub use encode::Encode;
pub use text::{encoding_by_name, Ascii, Latin1, TextEncoding, Utf16Be, Utf16Le, Utf8};
