/// Seeded 32-bit generator producing floats in `[0, 1)`.
///
/// Mulberry32: one `u32` of state, a Weyl increment and a multiply-xor-shift mix. The output is
/// an exact `u32 / 2^32`, so a given seed yields the same stream bit-for-bit on every platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Generator {
    state: u32,
}

impl Generator {
    const INCREMENT: u32 = 0x6D2B_79F5;

    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Build from any signed integer seed; negative and oversized values wrap into `u32`.
    pub fn from_i64(seed: i64) -> Self {
        Self::new(seed as u32)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

impl Iterator for Generator {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/prng.rs"]
mod tests;
