use super::*;

#[test]
fn hsl_primaries() {
    assert_eq!(hsl_to_rgb8(0.0, 1.0, 0.5), Rgba8::opaque(255, 0, 0));
    assert_eq!(hsl_to_rgb8(120.0, 1.0, 0.5), Rgba8::opaque(0, 255, 0));
    assert_eq!(hsl_to_rgb8(240.0, 1.0, 0.5), Rgba8::opaque(0, 0, 255));
    assert_eq!(hsl_to_rgb8(-120.0, 1.0, 0.5), Rgba8::opaque(0, 0, 255));
}

#[test]
fn hsl_zero_saturation_is_grey() {
    assert_eq!(hsl_to_rgb8(200.0, 0.0, 0.5), Rgba8::opaque(128, 128, 128));
}

#[test]
fn parses_hex_with_and_without_hash() {
    assert_eq!(parse_hex("#ff8000").unwrap(), Rgba8::opaque(255, 128, 0));
    assert_eq!(parse_hex("00FF7f").unwrap(), Rgba8::opaque(0, 255, 127));
    assert!(parse_hex("#fff").is_err());
    assert!(parse_hex("#gg0000").is_err());
}

#[test]
fn hex_round_trips_through_display() {
    let c = Rgba8::opaque(18, 20, 28);
    assert_eq!(parse_hex(&c.to_hex()).unwrap(), c);
}
