use crate::{foundation::core::Rgba8, palette::color::hsl_to_rgb8, settings::model::Settings};

/// Number of colors (and therefore stroke layers) in every palette.
pub const PALETTE_LEN: usize = 5;

/// Hue offsets, in degrees, used to derive a dynamic palette from the base hue.
pub const HUE_OFFSETS: [f64; PALETTE_LEN] = [0.0, 40.0, 80.0, 200.0, 320.0];

const DYNAMIC_SATURATION: f64 = 0.70;
const DYNAMIC_LIGHTNESS: f64 = 0.60;

/// A hand-picked, named set of colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CuratedPalette {
    pub name: &'static str,
    pub colors: [Rgba8; PALETTE_LEN],
}

/// Curated palettes in lookup order. The first entry is the fallback for unknown names.
pub const CURATED_PALETTES: &[CuratedPalette] = &[
    CuratedPalette {
        name: "Aurora",
        colors: [
            Rgba8::opaque(0x7f, 0xff, 0xd4),
            Rgba8::opaque(0x4f, 0xc3, 0xf7),
            Rgba8::opaque(0x9c, 0x6a, 0xde),
            Rgba8::opaque(0x3d, 0xdc, 0x97),
            Rgba8::opaque(0xf0, 0x6c, 0x9b),
        ],
    },
    CuratedPalette {
        name: "Ember",
        colors: [
            Rgba8::opaque(0xff, 0xb3, 0x47),
            Rgba8::opaque(0xff, 0x6b, 0x35),
            Rgba8::opaque(0xd7, 0x26, 0x3d),
            Rgba8::opaque(0x8c, 0x1c, 0x13),
            Rgba8::opaque(0xf4, 0xe2, 0x85),
        ],
    },
    CuratedPalette {
        name: "Lagoon",
        colors: [
            Rgba8::opaque(0x00, 0x5f, 0x73),
            Rgba8::opaque(0x0a, 0x93, 0x96),
            Rgba8::opaque(0x94, 0xd2, 0xbd),
            Rgba8::opaque(0xe9, 0xd8, 0xa6),
            Rgba8::opaque(0xee, 0x9b, 0x00),
        ],
    },
    CuratedPalette {
        name: "Orchard",
        colors: [
            Rgba8::opaque(0x60, 0x6c, 0x38),
            Rgba8::opaque(0x28, 0x36, 0x18),
            Rgba8::opaque(0xfe, 0xfa, 0xe0),
            Rgba8::opaque(0xdd, 0xa1, 0x5e),
            Rgba8::opaque(0xbc, 0x6c, 0x25),
        ],
    },
    CuratedPalette {
        name: "Dusk",
        colors: [
            Rgba8::opaque(0x22, 0x22, 0x3b),
            Rgba8::opaque(0x4a, 0x4e, 0x69),
            Rgba8::opaque(0x9a, 0x8c, 0x98),
            Rgba8::opaque(0xc9, 0xad, 0xa7),
            Rgba8::opaque(0xf2, 0xe9, 0xe4),
        ],
    },
];

/// Ordered colors used for the stroke layers of one scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub colors: [Rgba8; PALETTE_LEN],
}

impl Palette {
    pub fn iter(&self) -> impl Iterator<Item = &Rgba8> {
        self.colors.iter()
    }

    pub fn to_hex(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }
}

/// Case-sensitive lookup of a curated palette by name.
pub fn curated_palette(name: &str) -> Option<&'static CuratedPalette> {
    CURATED_PALETTES.iter().find(|p| p.name == name)
}

pub fn curated_names() -> impl Iterator<Item = &'static str> {
    CURATED_PALETTES.iter().map(|p| p.name)
}

/// Colors for a scene. Never fails: unknown curated names resolve to the first curated palette.
pub fn resolve_palette(settings: &Settings) -> Palette {
    match settings.curated.as_deref() {
        Some(name) => {
            let curated = curated_palette(name).unwrap_or_else(|| {
                tracing::debug!(name, "unknown curated palette, using fallback");
                &CURATED_PALETTES[0]
            });
            Palette {
                colors: curated.colors,
            }
        }
        None => dynamic_palette(settings.hue),
    }
}

/// Palette generated by rotating `hue` through [`HUE_OFFSETS`].
pub fn dynamic_palette(hue: u16) -> Palette {
    let base = f64::from(hue);
    Palette {
        colors: HUE_OFFSETS
            .map(|offset| hsl_to_rgb8(base + offset, DYNAMIC_SATURATION, DYNAMIC_LIGHTNESS)),
    }
}

/// Memoizes [`resolve_palette`] on the fields it actually reads.
#[derive(Clone, Debug, Default)]
pub struct PaletteCache {
    key: Option<(Option<String>, u16)>,
    palette: Option<Palette>,
}

impl PaletteCache {
    pub fn get(&mut self, settings: &Settings) -> Palette {
        let key = (settings.curated.clone(), settings.hue);
        match (&self.key, self.palette) {
            (Some(k), Some(p)) if *k == key => p,
            _ => {
                let p = resolve_palette(settings);
                self.key = Some(key);
                self.palette = Some(p);
                p
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/resolve.rs"]
mod tests;
