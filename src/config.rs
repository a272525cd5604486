use std::path::PathBuf;

use crate::{
    foundation::core::Rgba8, palette::color::parse_hex, presets::store::DEFAULT_PRESET_CAPACITY,
};

/// Default chance that randomize picks a curated palette over a dynamic one.
pub const DEFAULT_CURATED_PROBABILITY: f64 = 0.6;
/// Default headless frame rate.
pub const DEFAULT_FPS: f64 = 60.0;

const APP_DIR: &str = "driftfield";

/// Policy knobs for a studio session.
///
/// Built from defaults, then environment overrides ([`StudioConfig::from_env`]); the CLI layers
/// its own flags on top.
#[derive(Clone, Debug, PartialEq)]
pub struct StudioConfig {
    /// Maximum number of stored presets.
    pub preset_capacity: usize,
    /// Probability in `[0, 1]` that randomize selects a curated palette.
    pub curated_probability: f64,
    /// Frame rate of the interval clock.
    pub fps: f64,
    /// Directory holding `settings.json`, `presets.json` and `theme.json`. `None` when no
    /// location could be resolved; callers fall back to in-memory storage.
    pub state_dir: Option<PathBuf>,
    /// Directory exports are written to.
    pub downloads_dir: PathBuf,
    /// Clear color overriding the theme background.
    pub background: Option<Rgba8>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            preset_capacity: DEFAULT_PRESET_CAPACITY,
            curated_probability: DEFAULT_CURATED_PROBABILITY,
            fps: DEFAULT_FPS,
            state_dir: None,
            downloads_dir: PathBuf::from("."),
            background: None,
        }
    }
}

impl StudioConfig {
    /// Defaults with overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from `lookup`. Unparseable or out-of-range values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let preset_capacity = non_blank("DRIFTFIELD_PRESET_CAPACITY")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(d.preset_capacity);
        let curated_probability = non_blank("DRIFTFIELD_CURATED_PROBABILITY")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|p| (0.0..=1.0).contains(p))
            .unwrap_or(d.curated_probability);
        let fps = non_blank("DRIFTFIELD_FPS")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|f| f.is_finite() && *f > 0.0)
            .unwrap_or(d.fps);
        let background = non_blank("DRIFTFIELD_BACKGROUND").and_then(|v| match parse_hex(&v) {
            Ok(c) => Some(c),
            Err(err) => {
                tracing::warn!(%err, "ignoring DRIFTFIELD_BACKGROUND");
                None
            }
        });

        let state_dir = non_blank("DRIFTFIELD_STATE_DIR")
            .map(PathBuf::from)
            .or_else(|| non_blank("XDG_CONFIG_HOME").map(|x| PathBuf::from(x).join(APP_DIR)))
            .or_else(|| {
                non_blank("HOME").map(|h| PathBuf::from(h).join(".config").join(APP_DIR))
            });
        let downloads_dir = non_blank("DRIFTFIELD_DOWNLOADS_DIR")
            .map(PathBuf::from)
            .or_else(|| non_blank("HOME").map(|h| PathBuf::from(h).join("Downloads")))
            .unwrap_or(d.downloads_dir);

        Self {
            preset_capacity,
            curated_probability,
            fps,
            state_dir,
            downloads_dir,
            background,
        }
    }

    /// Set the background override from a `#RRGGBB` string.
    pub fn with_background_hex(mut self, hex: &str) -> Result<Self, String> {
        self.background = Some(parse_hex(hex)?);
        Ok(self)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
