//! driftfield renders a seed-driven, continuously animated flow field.
//!
//! A small [`Settings`] value (complexity, density, speed, stroke, palette, seed) fully determines
//! the animation: the same settings replay the same frames bit for bit. Around that core the
//! crate provides:
//!
//! - A frame-driven [`RenderLoop`] that strokes the field into a CPU raster [`Surface`]
//! - Compact share links ([`encode`] / [`decode`]) and a bounded [`PresetStore`]
//! - A [`Session`] that maps sliders, keybindings, export and sharing onto persistent
//!   [`AppState`]
#![forbid(unsafe_code)]

mod app;
mod config;
mod field;
mod foundation;
mod palette;
mod presets;
mod render;
mod settings;
mod storage;

pub use crate::foundation::core::{BezPath, LayoutSize, PixelSize, Point, Rgba8};
pub use crate::foundation::error::{DriftError, DriftResult};

pub use crate::app::export::{export_file_name, export_png, write_png};
pub use crate::app::interaction::{
    Clipboard, KeyAction, KeyOutcome, MemoryClipboard, MountedSession, Session, random_settings,
};
pub use crate::app::runner::{KeyEvent, RunReport, Runner};
pub use crate::app::state::AppState;
pub use crate::config::{DEFAULT_CURATED_PROBABILITY, DEFAULT_FPS, StudioConfig};
pub use crate::field::flow::FlowField;
pub use crate::field::prng::Generator;
pub use crate::palette::resolve::{
    CURATED_PALETTES, CuratedPalette, HUE_OFFSETS, PALETTE_LEN, Palette, PaletteCache,
    curated_names, curated_palette, dynamic_palette, resolve_palette,
};
pub use crate::presets::store::{DEFAULT_PRESET_CAPACITY, Preset, PresetStore};
pub use crate::render::clock::{FrameClock, ImmediateClock, IntervalClock};
pub use crate::render::frame_loop::{FrameStatus, FrameToken, LoopState, RenderLoop};
pub use crate::render::scene::{
    BASE_DT, Grid, SPEED_DT, build_layers, layer_opacity, stroke_width, time_step,
};
pub use crate::render::surface::{FrameRGBA, StrokeLayer, Surface};
pub use crate::render::theme::Theme;
pub use crate::render::viewport::{ResizeSubscription, Viewport};
pub use crate::settings::codec::{
    FRAGMENT_KEY, decode, decode_checked, encode, fragment_payload, from_json_checked, share_url,
    to_json,
};
pub use crate::settings::model::{Knob, Settings, SettingsPatch};
pub use crate::storage::kv::{
    FileStore, KeyValueStore, MemoryStore, PRESETS_KEY, SETTINGS_KEY, THEME_KEY,
};
