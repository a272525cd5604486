use crate::foundation::math::{clamp_unit, coerce_seed, wrap_hue};

/// The full parameter set of a scene.
///
/// A value object: the render loop reads one `Settings` per frame and every change replaces it
/// wholesale. Bounded fields are always in range once a value has gone through
/// [`Settings::merge`] (or any constructor in this module).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    /// Spatial frequency multiplier, `[0, 1]`.
    pub complexity: f64,
    /// Grid resolution and secondary frequency, `[0, 1]`.
    pub density: f64,
    /// Time advance and temporal frequency, `[0, 1]`.
    pub speed: f64,
    /// Line width and layer opacity, `[0, 1]`.
    pub stroke: f64,
    /// Base hue for the dynamic palette, `[0, 360)`.
    pub hue: u16,
    /// Curated palette name; `None` selects the dynamic palette.
    pub curated: Option<String>,
    /// Generator seed.
    pub seed: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            complexity: 0.55,
            density: 0.45,
            speed: 0.6,
            stroke: 0.5,
            hue: 210,
            curated: Some("Aurora".to_string()),
            seed: 12345,
        }
    }
}

/// Bounded unit-interval parameters, addressable by name (slider inputs, CLI flags).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Knob {
    Complexity,
    Density,
    Speed,
    Stroke,
}

impl Knob {
    pub const ALL: [Knob; 4] = [Knob::Complexity, Knob::Density, Knob::Speed, Knob::Stroke];

    pub fn name(self) -> &'static str {
        match self {
            Knob::Complexity => "complexity",
            Knob::Density => "density",
            Knob::Speed => "speed",
            Knob::Stroke => "stroke",
        }
    }

    pub fn get(self, s: &Settings) -> f64 {
        match self {
            Knob::Complexity => s.complexity,
            Knob::Density => s.density,
            Knob::Speed => s.speed,
            Knob::Stroke => s.stroke,
        }
    }
}

/// A partial update. Absent fields keep the value they are merged over.
///
/// Numbers are carried as raw `f64` so that out-of-range, fractional, negative, NaN and infinite
/// inputs all reach [`Settings::merge`], which is the single place they get clamped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettingsPatch {
    pub complexity: Option<f64>,
    pub density: Option<f64>,
    pub speed: Option<f64>,
    pub stroke: Option<f64>,
    pub hue: Option<f64>,
    /// `Some(None)` clears the curated palette; `None` leaves it untouched.
    pub curated: Option<Option<String>>,
    pub seed: Option<f64>,
}

impl SettingsPatch {
    pub fn knob(knob: Knob, value: f64) -> Self {
        let mut p = Self::default();
        match knob {
            Knob::Complexity => p.complexity = Some(value),
            Knob::Density => p.density = Some(value),
            Knob::Speed => p.speed = Some(value),
            Knob::Stroke => p.stroke = Some(value),
        }
        p
    }

    /// Every field of `settings`, as a patch. Merging it over anything reproduces `settings`
    /// (after clamping).
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            complexity: Some(settings.complexity),
            density: Some(settings.density),
            speed: Some(settings.speed),
            stroke: Some(settings.stroke),
            hue: Some(f64::from(settings.hue)),
            curated: Some(settings.curated.clone()),
            seed: Some(f64::from(settings.seed)),
        }
    }

    /// Lenient extraction from a JSON object.
    ///
    /// Unknown keys are ignored. A field with the wrong JSON type is treated as absent rather
    /// than failing the whole object, so one corrupt field does not discard the others.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let obj = value.as_object()?;
        let num = |key: &str| obj.get(key).and_then(serde_json::Value::as_f64);
        let curated = match obj.get("curated") {
            None => None,
            Some(serde_json::Value::Null) => Some(None),
            Some(serde_json::Value::String(s)) => Some(Some(s.clone())),
            Some(_) => None,
        };
        Some(Self {
            complexity: num("complexity"),
            density: num("density"),
            speed: num("speed"),
            stroke: num("stroke"),
            hue: num("hue"),
            curated,
            seed: num("seed"),
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Settings {
    /// Merge `patch` over `self`, clamping every bounded field.
    ///
    /// Non-finite hue/seed and NaN unit values fall back to the default table; infinities and
    /// out-of-range numbers land on the nearest bound (hue wraps). The result never carries an
    /// out-of-range value.
    pub fn merge(&self, patch: &SettingsPatch) -> Settings {
        let base = self.clamped();
        let d = Settings::default();
        let unit = |v: Option<f64>, current: f64, default: f64| {
            v.map_or(current, |v| clamp_unit(v, default))
        };
        Settings {
            complexity: unit(patch.complexity, base.complexity, d.complexity),
            density: unit(patch.density, base.density, d.density),
            speed: unit(patch.speed, base.speed, d.speed),
            stroke: unit(patch.stroke, base.stroke, d.stroke),
            hue: patch.hue.map_or(base.hue, |v| wrap_hue(v, d.hue)),
            curated: match &patch.curated {
                Some(name) => normalize_curated(name.as_deref()),
                None => base.curated,
            },
            seed: patch.seed.map_or(base.seed, |v| coerce_seed(v, d.seed)),
        }
    }

    /// Build from a patch over the default table.
    pub fn from_patch(patch: &SettingsPatch) -> Settings {
        Settings::default().merge(patch)
    }

    /// `self` with every bounded field forced into range.
    ///
    /// Identity for values produced by [`Settings::merge`]; it exists for values assembled by
    /// hand (struct literals, strict deserialization).
    pub fn clamped(&self) -> Settings {
        let d = Settings::default();
        Settings {
            complexity: clamp_unit(self.complexity, d.complexity),
            density: clamp_unit(self.density, d.density),
            speed: clamp_unit(self.speed, d.speed),
            stroke: clamp_unit(self.stroke, d.stroke),
            hue: self.hue % 360,
            curated: normalize_curated(self.curated.as_deref()),
            seed: self.seed,
        }
    }

    pub fn with_knob(&self, knob: Knob, value: f64) -> Settings {
        self.merge(&SettingsPatch::knob(knob, value))
    }
}

fn normalize_curated(name: Option<&str>) -> Option<String> {
    let name = name?.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/settings/model.rs"]
mod tests;
