use super::*;
use crate::field::prng::Generator;
use proptest::prelude::*;

fn aurora_defaults() -> Settings {
    Settings {
        complexity: 0.55,
        density: 0.45,
        speed: 0.6,
        stroke: 0.5,
        hue: 210,
        curated: Some("Aurora".to_string()),
        seed: 12345,
    }
}

#[test]
fn golden_origin_value_for_reference_scene() {
    let settings = aurora_defaults();
    let field = FlowField::from_settings(&settings);
    let mut g = Generator::new(settings.seed);
    let v = field.sample(0.0, 0.0, 0.0, g.next_f64());
    assert!((v - 0.919931168285776).abs() < 1e-12, "got {v}");
}

#[test]
fn frequencies_follow_settings() {
    let f = FlowField::from_settings(&aurora_defaults());
    assert!((f.spatial - 4.8).abs() < 1e-12);
    assert!((f.secondary - 2.1).abs() < 1e-12);
    assert!((f.temporal - 1.3).abs() < 1e-12);
}

#[test]
fn direction_is_unit_length() {
    for v in [-1.0, -0.3, 0.0, 0.5, 1.0] {
        let (dx, dy) = FlowField::direction(v);
        assert!(((dx * dx + dy * dy) - 1.0).abs() < 1e-12);
    }
    let (dx, dy) = FlowField::direction(0.25);
    assert!(dx.abs() < 1e-12 && (dy - 1.0).abs() < 1e-12);
}

proptest! {
    #[test]
    fn sample_is_bounded(
        x in 0.0f64..1.0,
        y in 0.0f64..1.0,
        t in 0.0f64..10_000.0,
        draw in 0.0f64..1.0,
        c in 0.0f64..=1.0,
        d in 0.0f64..=1.0,
        s in 0.0f64..=1.0,
    ) {
        let settings = Settings { complexity: c, density: d, speed: s, ..aurora_defaults() };
        let v = FlowField::from_settings(&settings).sample(x, y, t, draw);
        prop_assert!(v.is_finite());
        prop_assert!((-1.0..=1.0).contains(&v));
    }
}
