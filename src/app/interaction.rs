use std::{
    ops::{Deref, DerefMut},
    path::PathBuf,
};

use crate::{
    app::{export::export_png, state::AppState},
    config::StudioConfig,
    foundation::error::DriftResult,
    palette::resolve::CURATED_PALETTES,
    presets::store::{Preset, now_unix_ms},
    render::{
        frame_loop::{FrameStatus, LoopState, RenderLoop},
        theme::Theme,
        viewport::Viewport,
    },
    settings::{
        codec,
        model::{Knob, Settings, SettingsPatch},
    },
};

/// Destination for share links.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> DriftResult<()>;
}

/// Clipboard that keeps the last written text.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> DriftResult<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Bound keyboard shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Export,
    Randomize,
    ToggleTheme,
}

impl KeyAction {
    /// Case-insensitive binding: `E` export, `R` randomize, `D` toggle theme.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'e' => Some(KeyAction::Export),
            'r' => Some(KeyAction::Randomize),
            'd' => Some(KeyAction::ToggleTheme),
            _ => None,
        }
    }
}

/// What a handled key did.
#[derive(Clone, Debug, PartialEq)]
pub enum KeyOutcome {
    Exported(PathBuf),
    Randomized(Settings),
    ThemeChanged(Theme),
}

/// Fresh random settings.
///
/// Unit knobs, hue and seed are uniform. With probability `curated_probability` a random curated
/// palette is chosen, otherwise the dynamic palette.
pub fn random_settings(rng: &mut fastrand::Rng, curated_probability: f64) -> Settings {
    let curated = (rng.f64() < curated_probability)
        .then(|| CURATED_PALETTES[rng.usize(..CURATED_PALETTES.len())].name.to_string());
    Settings {
        complexity: rng.f64(),
        density: rng.f64(),
        speed: rng.f64(),
        stroke: rng.f64(),
        hue: rng.u16(0..360),
        curated,
        seed: rng.u32(..),
    }
}

/// One interactive view: live state, its render loop and the user-facing operations on both.
///
/// Every settings mutation goes through [`AppState`] (clamped, persisted) and is then handed to
/// the render loop, which picks it up on its next frame.
pub struct Session {
    config: StudioConfig,
    state: AppState,
    render: RenderLoop,
    clipboard: Box<dyn Clipboard>,
    rng: fastrand::Rng,
    fragment_consumed: bool,
}

impl Session {
    pub fn new(
        config: StudioConfig,
        state: AppState,
        viewport: Viewport,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let mut render = RenderLoop::new(viewport, state.settings().clone(), state.theme());
        render.set_background_override(config.background);
        Self {
            config,
            state,
            render,
            clipboard,
            rng: fastrand::Rng::new(),
            fragment_consumed: false,
        }
    }

    /// Replace the randomness source (deterministic tests, `--rng-seed`).
    pub fn with_rng(mut self, rng: fastrand::Rng) -> Self {
        self.rng = rng;
        self
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        self.state.settings()
    }

    pub fn render(&self) -> &RenderLoop {
        &self.render
    }

    /// Apply a `#preset=<encoded>` fragment. Only the first call per session has any effect;
    /// returns whether settings were replaced. A malformed payload yields the default settings.
    pub fn apply_fragment(&mut self, url_or_fragment: &str) -> DriftResult<bool> {
        if std::mem::replace(&mut self.fragment_consumed, true) {
            tracing::debug!("share fragment already consumed");
            return Ok(false);
        }
        let Some(payload) = codec::fragment_payload(url_or_fragment) else {
            return Ok(false);
        };
        let settings = codec::decode(payload);
        self.set_settings(&settings)?;
        Ok(true)
    }

    /// Start rendering and return a guard that unmounts on drop.
    #[tracing::instrument(skip(self))]
    pub fn mount(&mut self) -> DriftResult<MountedSession<'_>> {
        self.render.start()?;
        Ok(MountedSession { session: self })
    }

    pub fn is_mounted(&self) -> bool {
        self.render.state() == LoopState::Running
    }

    pub fn set_settings(&mut self, settings: &Settings) -> DriftResult<()> {
        let applied = self.state.set_settings(settings).map(|_| ());
        self.sync_render(applied)
    }

    /// Slider input and any other partial update.
    pub fn update(&mut self, patch: &SettingsPatch) -> DriftResult<()> {
        let applied = self.state.update(patch).map(|_| ());
        self.sync_render(applied)
    }

    pub fn set_knob(&mut self, knob: Knob, value: f64) -> DriftResult<()> {
        self.update(&SettingsPatch::knob(knob, value))
    }

    pub fn set_hue(&mut self, hue: f64) -> DriftResult<()> {
        self.update(&SettingsPatch {
            hue: Some(hue),
            ..SettingsPatch::default()
        })
    }

    pub fn set_curated(&mut self, name: Option<&str>) -> DriftResult<()> {
        self.update(&SettingsPatch {
            curated: Some(name.map(str::to_string)),
            ..SettingsPatch::default()
        })
    }

    pub fn set_seed(&mut self, seed: f64) -> DriftResult<()> {
        self.update(&SettingsPatch {
            seed: Some(seed),
            ..SettingsPatch::default()
        })
    }

    pub fn randomize(&mut self) -> DriftResult<Settings> {
        let next = random_settings(&mut self.rng, self.config.curated_probability);
        self.set_settings(&next)?;
        Ok(self.settings().clone())
    }

    pub fn toggle_theme(&mut self) -> DriftResult<Theme> {
        let persisted = self.state.toggle_theme().map(|_| ());
        let theme = self.state.theme();
        self.render.set_theme(theme)?;
        persisted?;
        Ok(theme)
    }

    /// Write the current frame to the downloads directory.
    pub fn export(&mut self) -> DriftResult<PathBuf> {
        let frame = self.render.snapshot()?;
        export_png(&frame, &self.config.downloads_dir, now_unix_ms())
    }

    /// Share link for the live settings; also copied to the clipboard.
    pub fn share(&mut self, base: &str) -> DriftResult<String> {
        let url = codec::share_url(base, self.settings());
        self.clipboard.write_text(&url)?;
        Ok(url)
    }

    pub fn save_preset(&mut self, title: &str) -> DriftResult<Option<Preset>> {
        self.state.save_preset(title)
    }

    /// Make a preset live. Returns `false` for an unknown id.
    pub fn load_preset(&mut self, id: &str) -> DriftResult<bool> {
        let loaded = match self.state.load_preset(id) {
            Ok(None) => return Ok(false),
            Ok(Some(_)) => Ok(()),
            Err(err) => Err(err),
        };
        self.sync_render(loaded)?;
        Ok(true)
    }

    pub fn remove_preset(&mut self, id: &str) -> DriftResult<bool> {
        self.state.remove_preset(id)
    }

    pub fn clear_presets(&mut self) -> DriftResult<()> {
        self.state.clear_presets()
    }

    /// Forward the live settings to the render loop even if persisting them failed, then report
    /// the persistence result.
    fn sync_render(&mut self, persisted: DriftResult<()>) -> DriftResult<()> {
        if let Err(err) = &persisted {
            tracing::warn!(%err, "settings not persisted");
        }
        self.render.apply_settings(self.state.settings())?;
        persisted
    }
}

/// A mounted [`Session`]: frames can be ticked and keybindings are live. Dropping it stops the
/// render loop.
pub struct MountedSession<'a> {
    session: &'a mut Session,
}

impl MountedSession<'_> {
    pub fn tick(&mut self) -> DriftResult<FrameStatus> {
        self.session.render.tick()
    }

    /// Stop rendering before the guard goes out of scope. Keys still dispatch, ticks go idle.
    pub fn unmount(&mut self) {
        self.session.render.stop();
    }

    /// Dispatch a key press. Unbound keys return `Ok(None)`.
    pub fn handle_key(&mut self, key: char) -> DriftResult<Option<KeyOutcome>> {
        let Some(action) = KeyAction::from_key(key) else {
            return Ok(None);
        };
        tracing::debug!(?action, "key action");
        let outcome = match action {
            KeyAction::Export => KeyOutcome::Exported(self.session.export()?),
            KeyAction::Randomize => KeyOutcome::Randomized(self.session.randomize()?),
            KeyAction::ToggleTheme => KeyOutcome::ThemeChanged(self.session.toggle_theme()?),
        };
        Ok(Some(outcome))
    }
}

impl Deref for MountedSession<'_> {
    type Target = Session;

    fn deref(&self) -> &Session {
        self.session
    }
}

impl DerefMut for MountedSession<'_> {
    fn deref_mut(&mut self) -> &mut Session {
        self.session
    }
}

impl Drop for MountedSession<'_> {
    fn drop(&mut self) {
        self.session.render.stop();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/interaction.rs"]
mod tests;
