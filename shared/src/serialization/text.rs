use crate::{Error, Result};

/// Turns text into bytes for the `char` and string encoders.
///
/// Implementations must be deterministic, and must either append the whole
/// encoding of `text` to `dst` or fail without touching it.
pub trait TextEncoding {
    fn name(&self) -> &'static str;

    fn encode_into(&self, text: &str, dst: &mut Vec<u8>) -> Result<()>;

    fn encode(&self, text: &str) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(text.len());
        self.encode_into(text, &mut bytes)?;
        Ok(bytes)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Utf8;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Ascii;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Latin1;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Utf16Be;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Utf16Le;

impl TextEncoding for Utf8 {
    fn name(&self) -> &'static str {
        "utf-8"
    }

    fn encode_into(&self, text: &str, dst: &mut Vec<u8>) -> Result<()> {
        dst.extend_from_slice(text.as_bytes());
        Ok(())
    }
}

// Single-byte encodings share the same shape, only the ceiling differs.
fn encode_single_byte(text: &str, dst: &mut Vec<u8>, max: u32, encoding: &'static str) -> Result<()> {
    if let Some(ch) = text.chars().find(|&c| c as u32 > max) {
        return Err(Error::Unencodable { ch, encoding });
    }
    dst.extend(text.chars().map(|c| c as u8));
    Ok(())
}

impl TextEncoding for Ascii {
    fn name(&self) -> &'static str {
        "ascii"
    }

    fn encode_into(&self, text: &str, dst: &mut Vec<u8>) -> Result<()> {
        encode_single_byte(text, dst, 0x7F, self.name())
    }
}

impl TextEncoding for Latin1 {
    fn name(&self) -> &'static str {
        "iso-8859-1"
    }

    fn encode_into(&self, text: &str, dst: &mut Vec<u8>) -> Result<()> {
        encode_single_byte(text, dst, 0xFF, self.name())
    }
}

impl TextEncoding for Utf16Be {
    fn name(&self) -> &'static str {
        "utf-16be"
    }

    fn encode_into(&self, text: &str, dst: &mut Vec<u8>) -> Result<()> {
        dst.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
        Ok(())
    }
}

impl TextEncoding for Utf16Le {
    fn name(&self) -> &'static str {
        "utf-16le"
    }

    fn encode_into(&self, text: &str, dst: &mut Vec<u8>) -> Result<()> {
        dst.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
        Ok(())
    }
}

/// Looks up a stock encoding by label, ignoring case.
pub fn encoding_by_name(label: &str) -> Option<Box<dyn TextEncoding + Send + Sync>> {
    let encoding: Box<dyn TextEncoding + Send + Sync> = match label.to_ascii_lowercase().as_str() {
        "utf-8" | "utf8" => Box::new(Utf8),
        "ascii" | "us-ascii" => Box::new(Ascii),
        "latin1" | "latin-1" | "iso-8859-1" => Box::new(Latin1),
        "utf-16be" | "utf16be" => Box::new(Utf16Be),
        "utf-16le" | "utf16le" => Box::new(Utf16Le),
        _ => return None,
    };
    Some(encoding)
}
