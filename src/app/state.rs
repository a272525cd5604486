use crate::{
    foundation::error::{DriftError, DriftResult},
    presets::store::{Preset, PresetStore},
    render::theme::Theme,
    settings::{
        codec,
        model::{Settings, SettingsPatch},
    },
    storage::kv::{
        KeyValueStore, MemoryStore, PRESETS_KEY, SETTINGS_KEY, THEME_KEY, read_best_effort,
    },
};

/// Live application state with write-through persistence.
///
/// Every setter updates memory first and then mirrors the affected key into the store, so a
/// storage failure never leaves the in-memory view stale. The returned error only reports that
/// the durable copy is behind.
pub struct AppState {
    settings: Settings,
    theme: Theme,
    presets: PresetStore,
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("settings", &self.settings)
            .field("theme", &self.theme)
            .field("presets", &self.presets.len())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Restore from `store`. Absent or malformed keys fall back to defaults.
    pub fn load(store: Box<dyn KeyValueStore>, preset_capacity: usize) -> Self {
        let settings = read_best_effort(store.as_ref(), SETTINGS_KEY)
            .map(|text| {
                codec::from_json_checked(&text).unwrap_or_else(|err| {
                    tracing::warn!(%err, "stored settings are malformed, using defaults");
                    Settings::default()
                })
            })
            .unwrap_or_default();

        let theme = read_best_effort(store.as_ref(), THEME_KEY)
            .map(|text| {
                Theme::parse(&text).unwrap_or_else(|| {
                    tracing::warn!(stored = %text.trim(), "unknown stored theme, using default");
                    Theme::default()
                })
            })
            .unwrap_or_default();

        let presets = read_best_effort(store.as_ref(), PRESETS_KEY)
            .map(|text| PresetStore::from_json(&text, preset_capacity))
            .unwrap_or_else(|| PresetStore::with_capacity(preset_capacity));

        tracing::debug!(?theme, presets = presets.len(), "state restored");
        Self {
            settings,
            theme,
            presets,
            store,
        }
    }

    /// Fresh state over a [`MemoryStore`].
    pub fn in_memory(preset_capacity: usize) -> Self {
        Self::load(Box::new(MemoryStore::new()), preset_capacity)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn presets(&self) -> &PresetStore {
        &self.presets
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Replace the live settings wholesale (clamped) and persist them.
    pub fn set_settings(&mut self, settings: &Settings) -> DriftResult<&Settings> {
        self.settings = settings.clamped();
        self.persist_settings()?;
        Ok(&self.settings)
    }

    /// Merge a partial update over the live settings and persist the result.
    pub fn update(&mut self, patch: &SettingsPatch) -> DriftResult<&Settings> {
        self.settings = self.settings.merge(patch);
        self.persist_settings()?;
        Ok(&self.settings)
    }

    pub fn set_theme(&mut self, theme: Theme) -> DriftResult<()> {
        self.theme = theme;
        let json = serde_json::to_string(&theme).map_err(|e| DriftError::serde(e.to_string()))?;
        self.store.set(THEME_KEY, &json)
    }

    pub fn toggle_theme(&mut self) -> DriftResult<Theme> {
        self.set_theme(self.theme.toggled())?;
        Ok(self.theme)
    }

    /// Snapshot the live settings. `Ok(None)` for a blank title.
    #[tracing::instrument(skip(self))]
    pub fn save_preset(&mut self, title: &str) -> DriftResult<Option<Preset>> {
        let Some(preset) = self.presets.save(&self.settings, title) else {
            return Ok(None);
        };
        self.persist_presets()?;
        tracing::debug!(id = %preset.id, "preset saved");
        Ok(Some(preset))
    }

    /// Make a preset's settings live. `Ok(None)` if the id is unknown.
    pub fn load_preset(&mut self, id: &str) -> DriftResult<Option<&Settings>> {
        let Some(settings) = self.presets.load(id) else {
            return Ok(None);
        };
        self.set_settings(&settings).map(Some)
    }

    /// Idempotent; storage is only rewritten when something was removed.
    pub fn remove_preset(&mut self, id: &str) -> DriftResult<bool> {
        if !self.presets.remove(id) {
            return Ok(false);
        }
        self.persist_presets()?;
        Ok(true)
    }

    pub fn clear_presets(&mut self) -> DriftResult<()> {
        self.presets.clear();
        self.persist_presets()
    }

    fn persist_settings(&mut self) -> DriftResult<()> {
        let json = codec::to_json(&self.settings)?;
        self.store.set(SETTINGS_KEY, &json)
    }

    fn persist_presets(&mut self) -> DriftResult<()> {
        let json = self.presets.to_json()?;
        self.store.set(PRESETS_KEY, &json)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/state.rs"]
mod tests;
