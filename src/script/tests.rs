use shared::serialization::{Ascii, BitWriter, Decimal};

use super::{encode, parse_line, parse_script, to_hex, Directive};

#[test]
fn test_parse_directives() {
    let script = "
# header
bits 0b101 3
bool true
u8 0xFF
i16 -2
u64 18446744073709551615
f32 1.5
decimal -12345 2
char A
str  two spaces
bytes AA ff
buffer 0102
";
    let directives = parse_script(script).unwrap();
    assert_eq!(
        directives,
        vec![
            Directive::Bits { value: 0b101, count: 3 },
            Directive::Bool(true),
            Directive::U8(0xFF),
            Directive::I16(-2),
            Directive::U64(u64::MAX),
            Directive::F32(1.5),
            Directive::Decimal(Decimal::new(-12345, 2).unwrap()),
            Directive::Char('A'),
            Directive::Str(" two spaces".to_owned()),
            Directive::Bytes(vec![0xAA, 0xFF]),
            Directive::Buffer(vec![0x01, 0x02]),
        ]
    );
}

#[test]
fn test_parse_errors_name_the_line() {
    let err = parse_script("u8 1\nu8 256\n").unwrap_err();
    assert_eq!(err.to_string(), "line 2");
    assert!(format!("{err:#}").contains("out of range"));

    assert!(parse_line("nope 1").is_err());
    assert!(parse_line("bits 1").is_err());
    assert!(parse_line("char AB").is_err());
    assert!(parse_line("bytes ABC").is_err());
    assert!(parse_line("bytes zz").is_err());
    assert!(parse_line("decimal 1 29").is_err());
    assert_eq!(parse_line("   ").unwrap(), None);
}

#[test]
fn test_encode_script() {
    let directives = parse_script("bits 0b101 3\n").unwrap();
    let out = encode(&directives, BitWriter::new(Vec::new())).unwrap();
    assert_eq!(out, [0xA0]);

    let directives = parse_script("u32 0xAABBCCDD\ni64 -1\n").unwrap();
    let out = encode(&directives, BitWriter::new(Vec::new())).unwrap();
    assert_eq!(to_hex(&out), "AA BB CC DD FF FF FF FF FF FF FF FF");
}

#[test]
fn test_encode_reports_failing_directive() {
    let directives = parse_script("u8 1\nstr é\n").unwrap();
    let err = encode(&directives, BitWriter::with_encoding(Vec::new(), Box::new(Ascii))).unwrap_err();
    assert!(err.to_string().starts_with("failed to encode directive 2"));

    let directives = [Directive::Bits { value: 0, count: 33 }];
    assert!(encode(&directives, BitWriter::new(Vec::new())).is_err());
}

#[test]
fn test_integers_take_a_single_sign() {
    assert_eq!(parse_line("i8 -5").unwrap(), Some(Directive::I8(-5)));
    assert_eq!(parse_line("i32 -0x10").unwrap(), Some(Directive::I32(-16)));
    assert_eq!(parse_line("u32 1_000").unwrap(), Some(Directive::U32(1000)));

    assert!(parse_line("u8 --5").is_err());
    assert!(parse_line("u8 +5").is_err());
    assert!(parse_line("u8 -+5").is_err());
    assert!(parse_line("i32 0x-10").is_err());
    assert!(parse_line("i64 --170141183460469231731687303715884105728").is_err());
    assert!(parse_line("i64 -170141183460469231731687303715884105728").is_err());
    assert!(parse_line("u8 -1").is_err());
}
