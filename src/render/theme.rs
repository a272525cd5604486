use crate::foundation::core::Rgba8;

/// Light/dark appearance. Only the background the loop clears to depends on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn background(self) -> Rgba8 {
        match self {
            Theme::Dark => Rgba8::opaque(18, 20, 28),
            Theme::Light => Rgba8::opaque(245, 243, 238),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Parse a stored theme name. Anything unrecognized is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().trim_matches('"').to_ascii_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/theme.rs"]
mod tests;
