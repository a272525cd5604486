/// Clamp into `[0, 1]`. NaN resolves to `fallback`, infinities to the nearest bound.
pub(crate) fn clamp_unit(v: f64, fallback: f64) -> f64 {
    if v.is_nan() {
        return fallback;
    }
    v.clamp(0.0, 1.0)
}

/// Round and wrap a hue into `[0, 360)`. Non-finite input resolves to `fallback`.
pub(crate) fn wrap_hue(v: f64, fallback: u16) -> u16 {
    if !v.is_finite() {
        return fallback;
    }
    (v.round().rem_euclid(360.0) as u16) % 360
}

/// Coerce any integer-ish value to a well-defined 32-bit seed (two's-complement truncation).
pub(crate) fn coerce_seed(v: f64, fallback: u32) -> u32 {
    if !v.is_finite() {
        return fallback;
    }
    // `as i64` saturates outside the i64 range; the truncation to u32 then wraps.
    (v.trunc() as i64) as u32
}

pub(crate) fn unpremul_u8(c: u8, a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    let v = (u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a);
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
