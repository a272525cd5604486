use super::*;
use proptest::prelude::*;

#[test]
fn golden_stream_for_default_seed() {
    let mut g = Generator::new(12345);
    assert_eq!(g.next_f64(), 0.9797282677609473);
    assert_eq!(g.next_f64(), 0.3067522644996643);
    assert_eq!(g.next_f64(), 0.484205421525985);
}

#[test]
fn zero_and_negative_seeds_are_well_defined() {
    let mut zero = Generator::new(0);
    assert_eq!(zero.next_f64(), 0.26642920868471265);
    assert_eq!(zero.next_f64(), 0.0003297457005828619);

    let mut neg = Generator::from_i64(-1);
    assert_eq!(neg.next_f64(), 0.8964226141106337);
    assert_eq!(neg.next_f64(), 0.189478256739676);
    assert_eq!(Generator::from_i64(-1), Generator::new(u32::MAX));
}

#[test]
fn iterator_matches_next_f64() {
    let mut a = Generator::new(99);
    let b: Vec<f64> = Generator::new(99).take(8).collect();
    for v in b {
        assert_eq!(a.next_f64(), v);
    }
}

proptest! {
    #[test]
    fn same_seed_same_stream(seed in any::<u32>()) {
        let mut a = Generator::new(seed);
        let mut b = Generator::new(seed);
        for _ in 0..10_000 {
            let (x, y) = (a.next_f64(), b.next_f64());
            prop_assert_eq!(x.to_bits(), y.to_bits());
            prop_assert!((0.0..1.0).contains(&x));
        }
    }
}
