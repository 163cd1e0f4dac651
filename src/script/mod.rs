use std::io::Write;

use anyhow::{anyhow, bail, Context};
use shared::serialization::{BitWriter, Decimal};

#[cfg(test)]
mod tests;

/// One line of a value script.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Bits { value: u32, count: u32 },
    Bool(bool),
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    Char(char),
    Str(String),
    Bytes(Vec<u8>),
    Buffer(Vec<u8>),
}

impl Directive {
    pub fn apply<W: Write>(&self, writer: &mut BitWriter<W>) -> shared::Result<()> {
        match self {
            Directive::Bits { value, count } => writer.write_bits(*value, *count),
            Directive::Bool(x) => writer.write_bool(*x),
            Directive::U8(x) => writer.write_u8(*x),
            Directive::I8(x) => writer.write_i8(*x),
            Directive::U16(x) => writer.write_u16(*x),
            Directive::I16(x) => writer.write_i16(*x),
            Directive::U32(x) => writer.write_u32(*x),
            Directive::I32(x) => writer.write_i32(*x),
            Directive::U64(x) => writer.write_u64(*x),
            Directive::I64(x) => writer.write_i64(*x),
            Directive::F32(x) => writer.write_f32(*x),
            Directive::F64(x) => writer.write_f64(*x),
            Directive::Decimal(x) => writer.write_decimal(x),
            Directive::Char(x) => writer.write_char(*x),
            Directive::Str(x) => writer.write_str(x),
            Directive::Bytes(x) => writer.write_bytes(x),
            Directive::Buffer(x) => writer.write_byte_buffer(x),
        }
    }
}

pub fn parse_script(text: &str) -> anyhow::Result<Vec<Directive>> {
    let mut directives = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if let Some(directive) = parse_line(line).with_context(|| format!("line {}", i + 1))? {
            directives.push(directive);
        }
    }
    Ok(directives)
}

/// Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> anyhow::Result<Option<Directive>> {
    let line = line.trim_start();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (kind, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    // `str` keeps its argument verbatim, everything else is trimmed.
    if kind == "str" {
        return Ok(Some(Directive::Str(rest.to_owned())));
    }
    let rest = rest.trim();

    let directive = match kind {
        "bits" => {
            let (value, count) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| anyhow!("expected `bits <value> <count>`"))?;
            Directive::Bits {
                value: parse_int(value)?,
                count: parse_int(count.trim())?,
            }
        }
        "bool" => Directive::Bool(rest.parse().with_context(|| format!("invalid bool '{rest}'"))?),
        "u8" => Directive::U8(parse_int(rest)?),
        "i8" => Directive::I8(parse_int(rest)?),
        "u16" => Directive::U16(parse_int(rest)?),
        "i16" => Directive::I16(parse_int(rest)?),
        "u32" => Directive::U32(parse_int(rest)?),
        "i32" => Directive::I32(parse_int(rest)?),
        "u64" => Directive::U64(parse_int(rest)?),
        "i64" => Directive::I64(parse_int(rest)?),
        "f32" => Directive::F32(rest.parse().with_context(|| format!("invalid f32 '{rest}'"))?),
        "f64" => Directive::F64(rest.parse().with_context(|| format!("invalid f64 '{rest}'"))?),
        "decimal" => {
            let (mantissa, scale) = rest.split_once(char::is_whitespace).unwrap_or((rest, "0"));
            Directive::Decimal(Decimal::new(parse_int(mantissa)?, parse_int(scale.trim())?)?)
        }
        "char" => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Directive::Char(c),
                _ => bail!("expected exactly one character, got '{rest}'"),
            }
        }
        "bytes" => Directive::Bytes(parse_hex(rest)?),
        "buffer" => Directive::Buffer(parse_hex(rest)?),
        _ => bail!("unknown directive '{kind}'"),
    };
    Ok(Some(directive))
}

/// Decimal, `0x` hex or `0b` binary, with an optional leading minus.
/// Underscores are allowed as separators.
fn parse_int<T: TryFrom<i128>>(text: &str) -> anyhow::Result<T> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, text),
    };
    let (radix, digits) = if let Some(hex) = digits.strip_prefix("0x") {
        (16, hex)
    } else if let Some(bin) = digits.strip_prefix("0b") {
        (2, bin)
    } else {
        (10, digits)
    };
    let digits = digits.replace('_', "");
    // The sign is handled above; `from_str_radix` would take a second one.
    if digits.starts_with(['+', '-']) {
        bail!("invalid integer '{text}'");
    }
    let magnitude = i128::from_str_radix(&digits, radix)
        .with_context(|| format!("invalid integer '{text}'"))?;

    let value = if negative { magnitude.checked_neg() } else { Some(magnitude) };
    value
        .and_then(|value| T::try_from(value).ok())
        .ok_or_else(|| anyhow!("integer '{text}' out of range"))
}

fn parse_hex(text: &str) -> anyhow::Result<Vec<u8>> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if !digits.is_ascii() {
        bail!("invalid hex '{text}'");
    }
    if digits.len() % 2 != 0 {
        bail!("odd number of hex digits in '{text}'");
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16).with_context(|| format!("invalid hex byte '{}'", &digits[i..i + 2]))
        })
        .collect()
}

/// Encodes every directive, closes the writer and hands back the sink.
pub fn encode<W: Write>(directives: &[Directive], mut writer: BitWriter<W>) -> anyhow::Result<W> {
    for (i, directive) in directives.iter().enumerate() {
        directive
            .apply(&mut writer)
            .with_context(|| format!("failed to encode directive {} ({directive:?})", i + 1))?;
    }
    log::debug!("Encoded {} directives into {} bits", directives.len(), writer.bits_written());
    Ok(writer.into_inner()?)
}

pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect::<Vec<_>>().join(" ")
}
