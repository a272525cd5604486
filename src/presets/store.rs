use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    foundation::error::{DriftError, DriftResult},
    settings::model::{Settings, SettingsPatch},
};

/// Default number of presets kept; older entries are evicted on save.
pub const DEFAULT_PRESET_CAPACITY: usize = 24;

/// A named, immutable snapshot of [`Settings`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Preset {
    /// Content-derived id, unique within one store.
    pub id: String,
    pub title: String,
    /// Creation time, milliseconds since the Unix epoch.
    #[serde(rename = "createdAt")]
    pub created_at: u64,
    #[serde(flatten)]
    pub settings: Settings,
}

/// Ordered preset collection, newest first, bounded to `capacity` entries.
///
/// Pure in-memory bookkeeping; [`crate::AppState`] mirrors every mutation into durable storage.
#[derive(Clone, Debug)]
pub struct PresetStore {
    presets: Vec<Preset>,
    capacity: usize,
    seq: u64,
}

impl Default for PresetStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_PRESET_CAPACITY)
    }
}

impl PresetStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            presets: Vec::new(),
            capacity: capacity.max(1),
            seq: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Presets, newest first.
    pub fn list(&self) -> &[Preset] {
        &self.presets
    }

    pub fn get(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// Snapshot `settings` under `title`, stamped with the current wall-clock time.
    pub fn save(&mut self, settings: &Settings, title: &str) -> Option<Preset> {
        self.save_at(settings, title, now_unix_ms())
    }

    /// Snapshot `settings` under `title` with an explicit creation time.
    ///
    /// Blank titles are rejected without touching the store. The new preset goes to the front;
    /// anything beyond `capacity` is evicted from the back.
    pub fn save_at(&mut self, settings: &Settings, title: &str, created_at: u64) -> Option<Preset> {
        let title = title.trim();
        if title.is_empty() {
            tracing::debug!("refusing to save preset with empty title");
            return None;
        }

        let settings = settings.clamped();
        let id = self.next_id(&settings, created_at);
        let preset = Preset {
            id,
            title: title.to_string(),
            created_at,
            settings,
        };

        self.presets.insert(0, preset.clone());
        if self.presets.len() > self.capacity {
            let evicted = self.presets.len() - self.capacity;
            self.presets.truncate(self.capacity);
            tracing::debug!(evicted, "preset store at capacity, evicted oldest");
        }
        Some(preset)
    }

    /// Parameter fields of a preset, detached from the preset itself.
    pub fn load(&self, id: &str) -> Option<Settings> {
        self.get(id).map(|p| p.settings.clone())
    }

    /// Remove by id. Removing an absent id is a no-op; returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.presets.len();
        self.presets.retain(|p| p.id != id);
        before != self.presets.len()
    }

    pub fn clear(&mut self) {
        self.presets.clear();
    }

    pub fn to_json(&self) -> DriftResult<String> {
        serde_json::to_string(&self.presets).map_err(|e| DriftError::serde(e.to_string()))
    }

    /// Restore from stored JSON.
    ///
    /// Lenient: a payload that is not an array yields an empty store, and individual entries
    /// without a usable id or title are skipped. Settings inside each entry are clamped.
    pub fn from_json(text: &str, capacity: usize) -> Self {
        let mut store = Self::with_capacity(capacity);
        let value: serde_json::Value = match serde_json::from_str(text) {
            Ok(v) => v,
            Err(err) => {
                tracing::warn!(%err, "stored presets are not valid JSON, starting empty");
                return store;
            }
        };
        let Some(items) = value.as_array() else {
            tracing::warn!("stored presets are not an array, starting empty");
            return store;
        };

        for item in items {
            match preset_from_json(item) {
                Some(p) if store.get(&p.id).is_none() => store.presets.push(p),
                Some(p) => tracing::warn!(id = %p.id, "skipping duplicate stored preset"),
                None => tracing::warn!("skipping malformed stored preset"),
            }
        }
        store.presets.truncate(store.capacity);
        store
    }

    fn next_id(&mut self, settings: &Settings, created_at: u64) -> String {
        let body = serde_json::to_string(settings).unwrap_or_default();
        loop {
            self.seq = self.seq.wrapping_add(1);
            let mut bytes = body.clone().into_bytes();
            bytes.extend_from_slice(&created_at.to_le_bytes());
            bytes.extend_from_slice(&self.seq.to_le_bytes());
            let id = format!("{:016x}", xxhash_rust::xxh3::xxh3_64(&bytes));
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

fn preset_from_json(item: &serde_json::Value) -> Option<Preset> {
    let obj = item.as_object()?;
    let id = obj.get("id")?.as_str()?.trim();
    let title = obj.get("title")?.as_str()?.trim();
    if id.is_empty() || title.is_empty() {
        return None;
    }
    let created_at = obj
        .get("createdAt")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0);
    let patch = SettingsPatch::from_json(item)?;
    Some(Preset {
        id: id.to_string(),
        title: title.to_string(),
        created_at,
        settings: Settings::from_patch(&patch),
    })
}

pub(crate) fn now_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis().min(u128::from(u64::MAX)) as u64)
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/presets/store.rs"]
mod tests;
