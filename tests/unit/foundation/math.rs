use super::*;

#[test]
fn clamp_unit_handles_non_finite() {
    assert_eq!(clamp_unit(f64::NAN, 0.25), 0.25);
    assert_eq!(clamp_unit(f64::INFINITY, 0.25), 1.0);
    assert_eq!(clamp_unit(f64::NEG_INFINITY, 0.25), 0.0);
    assert_eq!(clamp_unit(-3.0, 0.25), 0.0);
    assert_eq!(clamp_unit(0.4, 0.25), 0.4);
}

#[test]
fn wrap_hue_stays_in_range() {
    assert_eq!(wrap_hue(360.0, 7), 0);
    assert_eq!(wrap_hue(-30.0, 7), 330);
    assert_eq!(wrap_hue(359.6, 7), 0);
    assert_eq!(wrap_hue(725.0, 7), 5);
    assert_eq!(wrap_hue(f64::NAN, 7), 7);
    assert_eq!(wrap_hue(f64::INFINITY, 7), 7);
}

#[test]
fn coerce_seed_wraps_like_u32_truncation() {
    assert_eq!(coerce_seed(0.0, 9), 0);
    assert_eq!(coerce_seed(-1.0, 9), u32::MAX);
    assert_eq!(coerce_seed(4_294_967_296.0, 9), 0);
    assert_eq!(coerce_seed(12345.9, 9), 12345);
    assert_eq!(coerce_seed(f64::NAN, 9), 9);
}

#[test]
fn unpremul_inverts_opaque_and_zero() {
    assert_eq!(unpremul_u8(200, 255), 200);
    assert_eq!(unpremul_u8(0, 0), 0);
    assert_eq!(unpremul_u8(64, 128), 128);
}
