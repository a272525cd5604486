use super::*;
use proptest::prelude::*;

fn in_range(s: &Settings) -> bool {
    Knob::ALL
        .iter()
        .all(|k| (0.0..=1.0).contains(&k.get(s)) && k.get(s).is_finite())
        && s.hue < 360
}

#[test]
fn defaults_are_in_range() {
    assert!(in_range(&Settings::default()));
    assert_eq!(Settings::default().clamped(), Settings::default());
}

#[test]
fn merge_keeps_absent_fields() {
    let base = Settings {
        complexity: 0.1,
        seed: 77,
        ..Settings::default()
    };
    let merged = base.merge(&SettingsPatch {
        density: Some(0.9),
        ..SettingsPatch::default()
    });
    assert_eq!(merged.complexity, 0.1);
    assert_eq!(merged.density, 0.9);
    assert_eq!(merged.seed, 77);
    assert_eq!(merged.curated, base.curated);
}

#[test]
fn merge_clamps_out_of_range_and_non_finite() {
    let merged = Settings::default().merge(&SettingsPatch {
        complexity: Some(4.0),
        density: Some(-2.0),
        speed: Some(f64::NAN),
        stroke: Some(f64::INFINITY),
        hue: Some(-90.0),
        seed: Some(-1.0),
        curated: None,
    });
    assert_eq!(merged.complexity, 1.0);
    assert_eq!(merged.density, 0.0);
    assert_eq!(merged.speed, Settings::default().speed);
    assert_eq!(merged.stroke, 1.0);
    assert_eq!(merged.hue, 270);
    assert_eq!(merged.seed, u32::MAX);
}

#[test]
fn non_finite_input_falls_back_to_default_table() {
    let base = Settings {
        speed: 0.05,
        hue: 12,
        seed: 3,
        ..Settings::default()
    };
    let merged = base.merge(&SettingsPatch {
        speed: Some(f64::NAN),
        hue: Some(f64::INFINITY),
        seed: Some(f64::NAN),
        ..SettingsPatch::default()
    });
    let d = Settings::default();
    assert_eq!(merged.speed, d.speed);
    assert_eq!(merged.hue, d.hue);
    assert_eq!(merged.seed, d.seed);
}

#[test]
fn curated_can_be_cleared_or_blanked() {
    let cleared = Settings::default().merge(&SettingsPatch {
        curated: Some(None),
        ..SettingsPatch::default()
    });
    assert_eq!(cleared.curated, None);

    let blank = Settings::default().merge(&SettingsPatch {
        curated: Some(Some("   ".to_string())),
        ..SettingsPatch::default()
    });
    assert_eq!(blank.curated, None);

    let padded = Settings::default().merge(&SettingsPatch {
        curated: Some(Some(" Ember ".to_string())),
        ..SettingsPatch::default()
    });
    assert_eq!(padded.curated.as_deref(), Some("Ember"));
}

#[test]
fn from_json_ignores_mistyped_fields() {
    let v = serde_json::json!({
        "complexity": "lots",
        "density": 0.2,
        "curated": 12,
        "extra": true
    });
    let patch = SettingsPatch::from_json(&v).unwrap();
    assert_eq!(patch.complexity, None);
    assert_eq!(patch.density, Some(0.2));
    assert_eq!(patch.curated, None);

    let explicit_null = SettingsPatch::from_json(&serde_json::json!({"curated": null})).unwrap();
    assert_eq!(explicit_null.curated, Some(None));

    assert!(SettingsPatch::from_json(&serde_json::json!([1, 2])).is_none());
}

#[test]
fn knob_patch_targets_one_field() {
    let s = Settings::default().with_knob(Knob::Stroke, 0.9);
    assert_eq!(s.stroke, 0.9);
    assert_eq!(s.complexity, Settings::default().complexity);
    assert!(SettingsPatch::default().is_empty());
    assert!(!SettingsPatch::knob(Knob::Speed, 0.3).is_empty());
}

fn any_number() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<f64>(),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        -1e12f64..1e12,
    ]
}

proptest! {
    #[test]
    fn clamp_output_always_in_range(
        c in any_number(),
        d in any_number(),
        sp in any_number(),
        st in any_number(),
        h in any_number(),
        seed in any_number(),
    ) {
        let merged = Settings::default().merge(&SettingsPatch {
            complexity: Some(c),
            density: Some(d),
            speed: Some(sp),
            stroke: Some(st),
            hue: Some(h),
            seed: Some(seed),
            curated: None,
        });
        prop_assert!(in_range(&merged));
    }

    #[test]
    fn merge_of_full_patch_reproduces_settings(
        c in 0.0f64..=1.0,
        d in 0.0f64..=1.0,
        hue in 0u16..360,
        seed in any::<u32>(),
    ) {
        let s = Settings { complexity: c, density: d, hue, seed, ..Settings::default() };
        prop_assert_eq!(Settings::default().merge(&SettingsPatch::from_settings(&s)), s);
    }
}
