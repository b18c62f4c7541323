use super::*;

#[test]
fn six_digit_parse_is_opaque() {
    let c = parse_hex("00ff7f").unwrap();
    assert_eq!(
        c,
        Rgba8 {
            r: 0,
            g: 255,
            b: 127,
            a: 255
        }
    );
}

#[test]
fn eight_digit_parse_reads_alpha_first() {
    let c = parse_hex("80123456").unwrap();
    assert_eq!(c.a, 0x80);
    // The last six digits carry the same RGB as a direct six-digit parse.
    let rgb = parse_hex("123456").unwrap();
    assert_eq!((c.r, c.g, c.b), (rgb.r, rgb.g, rgb.b));
}

#[test]
fn parse_is_case_insensitive() {
    assert_eq!(parse_hex("AbCdEf"), parse_hex("abcdef"));
}

#[test]
fn malformed_inputs_yield_none() {
    assert_eq!(parse_hex(""), None);
    assert_eq!(parse_hex("12"), None);
    assert_eq!(parse_hex("1234567"), None);
    assert_eq!(parse_hex("zzzzzz"), None);
    assert_eq!(parse_hex("12345g"), None);
    assert_eq!(parse_hex("фффффф"), None);
}

#[test]
fn hex_round_trip() {
    assert_eq!(parse_hex("336699").unwrap().to_hex(), "336699");
    assert_eq!(parse_hex("80336699").unwrap().to_hex(), "80336699");
}

#[test]
fn serde_uses_hex_strings() {
    let c: Rgba8 = serde_json::from_str("\"00ff00\"").unwrap();
    assert_eq!(c, Rgba8::opaque(0, 255, 0));
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"00ff00\"");
    assert!(serde_json::from_str::<Rgba8>("\"nope\"").is_err());
}
