use std::io::Write;

use super::bit_writer::BitWriter;
use super::decimal::Decimal;
use crate::Result;

/// A value with a fixed encoding in the bit stream.
pub trait Encode {
    fn encode<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()>;
}

macro_rules! impl_encode {
    ($($ty:ty => $method:ident),* $(,)?) => {
        $(
            impl Encode for $ty {
                #[inline]
                fn encode<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
                    writer.$method(*self)
                }
            }
        )*
    };
}

impl_encode! {
    bool => write_bool,
    u8 => write_u8,
    i8 => write_i8,
    u16 => write_u16,
    i16 => write_i16,
    u32 => write_u32,
    i32 => write_i32,
    u64 => write_u64,
    i64 => write_i64,
    f32 => write_f32,
    f64 => write_f64,
    char => write_char,
}

impl Encode for Decimal {
    fn encode<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        writer.write_decimal(self)
    }
}

impl Encode for str {
    fn encode<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        writer.write_str(self)
    }
}

impl Encode for String {
    fn encode<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        writer.write_str(self)
    }
}

// Byte slices are length-prefixed; use `write_bytes` for raw output.
impl Encode for [u8] {
    fn encode<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        writer.write_byte_buffer(self)
    }
}

impl Encode for Vec<u8> {
    fn encode<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        writer.write_byte_buffer(self)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    #[inline]
    fn encode<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        (**self).encode(writer)
    }
}

impl<W: Write> BitWriter<W> {
    /// Writes any `Encode` value, picking the encoder from its type.
    #[inline]
    pub fn write<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.encode(self)
    }
}
