use super::*;
use proptest::prelude::*;

fn with_palette(curated: Option<&str>, hue: u16) -> Settings {
    Settings {
        curated: curated.map(str::to_string),
        hue,
        ..Settings::default()
    }
}

#[test]
fn known_curated_name_returns_fixed_colors() {
    let p = resolve_palette(&with_palette(Some("Ember"), 0));
    assert_eq!(p.colors, curated_palette("Ember").unwrap().colors);
}

#[test]
fn unknown_curated_name_falls_back_to_first() {
    let p = resolve_palette(&with_palette(Some("NoSuchPalette"), 0));
    assert_eq!(p.colors, CURATED_PALETTES[0].colors);
}

#[test]
fn curated_ignores_hue() {
    let a = resolve_palette(&with_palette(Some("Lagoon"), 10));
    let b = resolve_palette(&with_palette(Some("Lagoon"), 300));
    assert_eq!(a, b);
}

#[test]
fn dynamic_palette_rotates_base_hue() {
    let p = resolve_palette(&with_palette(None, 0));
    assert_eq!(p.colors[0], hsl_to_rgb8(0.0, 0.7, 0.6));
    assert_eq!(p.colors[1], hsl_to_rgb8(40.0, 0.7, 0.6));
    assert_eq!(p.colors[3], hsl_to_rgb8(200.0, 0.7, 0.6));

    // Rotating the base hue by 40 degrees shifts the first two layers by one slot.
    let shifted = dynamic_palette(40);
    assert_eq!(shifted.colors[0], p.colors[1]);
    assert_eq!(shifted.colors[1], p.colors[2]);
}

#[test]
fn curated_names_are_unique() {
    let names: Vec<_> = curated_names().collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(names.len(), sorted.len());
    assert_eq!(names[0], "Aurora");
}

#[test]
fn cache_recomputes_only_on_relevant_change() {
    let mut cache = PaletteCache::default();
    let a = with_palette(None, 100);
    let first = cache.get(&a);

    let tweaked = Settings {
        complexity: 0.1,
        ..a.clone()
    };
    assert_eq!(cache.get(&tweaked), first);

    let rehued = Settings { hue: 101, ..a };
    assert_ne!(cache.get(&rehued), first);
}

proptest! {
    #[test]
    fn always_five_colors(name in proptest::option::of("[A-Za-z]{0,12}"), hue in 0u16..360) {
        let p = resolve_palette(&with_palette(name.as_deref(), hue));
        prop_assert_eq!(p.colors.len(), PALETTE_LEN);
        prop_assert!(p.iter().all(|c| c.a == 255));
    }
}
