use super::*;

fn settings_with_seed(seed: u32) -> Settings {
    Settings {
        seed,
        ..Settings::default()
    }
}

#[test]
fn saving_thirty_keeps_newest_twenty_four() {
    let mut store = PresetStore::default();
    for i in 0..30u32 {
        store
            .save_at(&settings_with_seed(i), &format!("p{i}"), u64::from(i))
            .unwrap();
    }
    assert_eq!(store.len(), 24);
    let titles: Vec<_> = store.list().iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles.first(), Some(&"p29"));
    assert_eq!(titles.last(), Some(&"p6"));
    assert!(store.list().iter().all(|p| p.settings.seed >= 6));
}

#[test]
fn empty_or_blank_title_is_a_no_op() {
    let mut store = PresetStore::default();
    store.save_at(&Settings::default(), "keep", 1).unwrap();
    assert!(store.save_at(&Settings::default(), "", 2).is_none());
    assert!(store.save_at(&Settings::default(), "  \t", 3).is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn identical_settings_get_distinct_ids() {
    let mut store = PresetStore::default();
    let a = store.save_at(&Settings::default(), "a", 5).unwrap();
    let b = store.save_at(&Settings::default(), "b", 5).unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(a.id.len(), 16);
}

#[test]
fn load_returns_parameters_only() {
    let mut store = PresetStore::default();
    let s = Settings {
        hue: 99,
        curated: None,
        ..Settings::default()
    };
    let p = store.save_at(&s, "  Night  ", 10).unwrap();
    assert_eq!(p.title, "Night");
    assert_eq!(store.load(&p.id), Some(s));
    assert_eq!(store.load("missing"), None);
}

#[test]
fn remove_absent_id_leaves_store_unchanged() {
    let mut store = PresetStore::default();
    let p = store.save_at(&Settings::default(), "x", 1).unwrap();
    let before = store.list().to_vec();
    assert!(!store.remove("nope"));
    assert_eq!(store.list(), before.as_slice());
    assert!(store.remove(&p.id));
    assert!(!store.remove(&p.id));
    assert!(store.is_empty());
}

#[test]
fn clear_empties() {
    let mut store = PresetStore::default();
    store.save_at(&Settings::default(), "x", 1).unwrap();
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn json_round_trip_preserves_order() {
    let mut store = PresetStore::default();
    for i in 0..3u32 {
        store
            .save_at(&settings_with_seed(i), &format!("t{i}"), 100 + u64::from(i))
            .unwrap();
    }
    let text = store.to_json().unwrap();
    let restored = PresetStore::from_json(&text, DEFAULT_PRESET_CAPACITY);
    assert_eq!(restored.list(), store.list());

    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(v[0]["createdAt"], 102);
    assert_eq!(v[0]["title"], "t2");
}

#[test]
fn malformed_json_yields_empty_store() {
    assert!(PresetStore::from_json("not json", 24).is_empty());
    assert!(PresetStore::from_json("{\"a\":1}", 24).is_empty());
}

#[test]
fn malformed_entries_are_skipped_and_settings_clamped() {
    let text = r#"[
        {"id": "a", "title": "ok", "createdAt": 1, "complexity": 9, "seed": 3},
        {"id": "", "title": "no id"},
        {"title": "missing id"},
        {"id": "c", "title": "   "},
        {"id": "a", "title": "duplicate"},
        42
    ]"#;
    let store = PresetStore::from_json(text, 24);
    assert_eq!(store.len(), 1);
    let p = &store.list()[0];
    assert_eq!(p.settings.complexity, 1.0);
    assert_eq!(p.settings.seed, 3);
}

#[test]
fn restore_truncates_to_capacity() {
    let mut big = PresetStore::with_capacity(10);
    for i in 0..10u32 {
        big.save_at(&settings_with_seed(i), "t", u64::from(i)).unwrap();
    }
    let small = PresetStore::from_json(&big.to_json().unwrap(), 4);
    assert_eq!(small.len(), 4);
    assert_eq!(small.list()[0].settings.seed, 9);
}
