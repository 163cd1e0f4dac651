use std::io::Write;

use log::{debug, error, trace};

use super::accumulator::BitAccumulator;
use super::decimal::Decimal;
use super::text::{TextEncoding, Utf8};
use super::word;
use crate::{Error, Result, LENGTH_PREFIX_BITS, WORD_BITS};

/// Packs values into a big-endian bit stream on top of any `Write` sink.
///
/// The writer owns whatever it is given. Hand it `&mut sink` to keep the sink
/// open after the writer is closed; hand it the sink itself to have it closed
/// (dropped) along with the writer.
pub struct BitWriter<W: Write> {
    // `None` once closed.
    sink: Option<W>,
    acc: BitAccumulator,
    bits_written: u64,
    encoding: Box<dyn TextEncoding + Send + Sync>,
}

impl<W: Write> BitWriter<W> {
    pub fn new(sink: W) -> Self {
        Self::with_encoding(sink, Box::new(Utf8))
    }

    pub fn with_encoding(sink: W, encoding: Box<dyn TextEncoding + Send + Sync>) -> Self {
        Self {
            sink: Some(sink),
            acc: BitAccumulator::new(),
            bits_written: 0,
            encoding,
        }
    }

    #[inline]
    pub fn encoding(&self) -> &dyn TextEncoding {
        self.encoding.as_ref()
    }

    /// Every bit accepted so far, pending ones included. Bits whose sink
    /// write failed still count.
    #[inline]
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Bytes the sink will hold once the writer is closed.
    #[inline]
    pub fn bytes_written(&self) -> u64 {
        (self.bits_written + 7) / 8
    }

    /// True when no bits are waiting for a word to fill up.
    #[inline]
    pub fn is_aligned(&self) -> bool {
        self.acc.is_aligned()
    }

    #[inline]
    pub fn pending_bits(&self) -> u32 {
        self.acc.pending_bits()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.sink.is_none()
    }

    pub fn get_ref(&self) -> Option<&W> {
        self.sink.as_ref()
    }

    #[inline]
    fn sink(&mut self) -> Result<&mut W> {
        self.sink.as_mut().ok_or(Error::Closed)
    }
}

// Bits and bytes
impl<W: Write> BitWriter<W> {
    /// Appends the low `count` bits of `bits`, most significant first.
    pub fn write_bits(&mut self, bits: u32, count: u32) -> Result<()> {
        if count == 0 || count > WORD_BITS {
            return Err(Error::BitCountOutOfRange { count });
        }
        // Checked up front so a closed writer keeps its accumulator untouched.
        self.sink()?;

        self.bits_written += count as u64;
        if let Some(full) = self.acc.push(bits, count) {
            self.sink()?.write_all(&word::disassemble(full))?;
        }
        Ok(())
    }

    /// Writes `buffer[offset..offset + count]`.
    pub fn write_bytes_range(&mut self, buffer: &[u8], offset: usize, count: usize) -> Result<()> {
        let out_of_bounds = Error::RangeOutOfBounds {
            offset,
            count,
            len: buffer.len(),
        };
        match offset.checked_add(count) {
            Some(end) if end <= buffer.len() => self.write_bytes(&buffer[offset..end]),
            _ => Err(out_of_bounds),
        }
    }

    /// Writes raw bytes. Goes straight to the sink when the stream is
    /// aligned, otherwise through the accumulator a word at a time.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }

        if self.acc.is_aligned() {
            // Counted before the sink write, same as `write_bits`.
            self.sink()?;
            self.bits_written += bytes.len() as u64 * 8;
            self.sink()?.write_all(bytes)?;
            return Ok(());
        }

        let mut words = bytes.chunks_exact(4);
        for chunk in &mut words {
            let mut quad = [0u8; 4];
            quad.copy_from_slice(chunk);
            self.write_bits(word::assemble(quad), 32)?;
        }
        for &byte in words.remainder() {
            self.write_bits(byte as u32, 8)?;
        }
        Ok(())
    }
}

// Fixed-width values
impl<W: Write> BitWriter<W> {
    #[inline]
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_bits(value as u32, 8)
    }

    #[inline]
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_bits(value as u32, 8)
    }

    #[inline]
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_u8(value as u8)
    }

    #[inline]
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_bits(value as u32, 16)
    }

    #[inline]
    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_u16(value as u16)
    }

    #[inline]
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_bits(value, 32)
    }

    #[inline]
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_u32(value as u32)
    }

    /// High word first.
    #[inline]
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write_bits((value >> 32) as u32, 32)?;
        self.write_bits(value as u32, 32)
    }

    #[inline]
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_u64(value as u64)
    }

    #[inline]
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_u32(value.to_bits())
    }

    #[inline]
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_u64(value.to_bits())
    }

    pub fn write_decimal(&mut self, value: &Decimal) -> Result<()> {
        self.write_bytes(&value.to_bytes())
    }
}

// Length-prefixed values
impl<W: Write> BitWriter<W> {
    /// 32-bit length, then the bytes. Empty buffers still get their prefix.
    pub fn write_byte_buffer(&mut self, bytes: &[u8]) -> Result<()> {
        let len = u32::try_from(bytes.len()).map_err(|_| Error::LengthOverflow { len: bytes.len() })?;
        self.write_bits(len, LENGTH_PREFIX_BITS)?;
        self.write_bytes(bytes)
    }

    pub fn write_str(&mut self, text: &str) -> Result<()> {
        let bytes = self.encoding.encode(text)?;
        self.write_byte_buffer(&bytes)
    }

    pub fn write_char(&mut self, ch: char) -> Result<()> {
        let mut utf8 = [0u8; 4];
        self.write_str(ch.encode_utf8(&mut utf8))
    }

    /// Writes a single UTF-16 code unit as a character. Surrogate halves
    /// cannot stand alone and are rejected before anything is written.
    pub fn write_utf16_unit(&mut self, unit: u16) -> Result<()> {
        let ch = char::from_u32(unit as u32).ok_or(Error::InvalidChar { unit })?;
        self.write_char(ch)
    }
}

// Lifecycle
impl<W: Write> BitWriter<W> {
    /// Flushes the sink. Pending bits stay pending: padding them here would
    /// shift everything written afterwards.
    pub fn flush(&mut self) -> Result<()> {
        self.sink()?.flush()?;
        Ok(())
    }

    /// Writes out the pending partial word (only the bytes that hold data),
    /// flushes and releases the sink. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if self.finish()?.is_some() {
            debug!("Bit writer closed after {} bits", self.bits_written);
        }
        Ok(())
    }

    /// Like `close`, but hands the sink back instead of dropping it.
    pub fn into_inner(mut self) -> Result<W> {
        self.finish()?.ok_or(Error::Closed)
    }

    fn finish(&mut self) -> Result<Option<W>> {
        let Some(sink) = self.sink.as_mut() else {
            return Ok(None);
        };

        if let Some((partial, used_bits)) = self.acc.take_partial() {
            let bytes = word::disassemble(partial);
            let len = word::occupied_bytes(used_bits);
            trace!("Flushing {used_bits} pending bits as {len} bytes");
            sink.write_all(&bytes[..len])?;
        }
        sink.flush()?;

        Ok(self.sink.take())
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        if let Err(e) = self.finish() {
            error!("Failed to flush bit writer on drop: {e}");
        }
    }
}
