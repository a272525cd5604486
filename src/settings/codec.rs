use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::{
    foundation::error::{DriftError, DriftResult},
    settings::model::{Settings, SettingsPatch},
};

/// Fragment key carrying an encoded scene: `#preset=<encoded>`.
pub const FRAGMENT_KEY: &str = "preset";

/// Serialize for durable storage.
pub fn to_json(settings: &Settings) -> DriftResult<String> {
    serde_json::to_string(settings).map_err(|e| DriftError::serde(e.to_string()))
}

/// Parse stored JSON leniently: missing or mistyped fields take defaults, values are clamped.
pub fn from_json_checked(text: &str) -> DriftResult<Settings> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| DriftError::serde(e.to_string()))?;
    let patch = SettingsPatch::from_json(&value)
        .ok_or_else(|| DriftError::serde("settings JSON must be an object"))?;
    Ok(Settings::from_patch(&patch))
}

/// Compact, URL-fragment-safe encoding: settings JSON under unpadded URL-safe base64.
pub fn encode(settings: &Settings) -> String {
    // Settings only holds finite numbers, strings and an Option, so JSON encoding is total.
    let json = serde_json::to_vec(&settings.clamped()).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Inverse of [`encode`] that reports why a payload was rejected.
pub fn decode_checked(encoded: &str) -> DriftResult<Settings> {
    let trimmed = encoded.trim();
    let bytes = URL_SAFE_NO_PAD
        .decode(trimmed.trim_end_matches('='))
        .map_err(|e| DriftError::serde(format!("share payload is not base64: {e}")))?;
    let text = std::str::from_utf8(&bytes)
        .map_err(|e| DriftError::serde(format!("share payload is not UTF-8: {e}")))?;
    from_json_checked(text)
}

/// Inverse of [`encode`]. Malformed input yields the default settings; this never fails.
pub fn decode(encoded: &str) -> Settings {
    decode_checked(encoded).unwrap_or_else(|err| {
        tracing::warn!(%err, "discarding malformed share payload");
        Settings::default()
    })
}

/// Extract the encoded payload from a URL or bare fragment (`...#preset=<encoded>`).
///
/// Returns `None` when there is no fragment or it does not carry the preset key; a present but
/// empty payload returns `Some("")`.
pub fn fragment_payload(url_or_fragment: &str) -> Option<&str> {
    let fragment = match url_or_fragment.split_once('#') {
        Some((_, frag)) => frag,
        None => url_or_fragment,
    };
    fragment.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == FRAGMENT_KEY).then_some(value)
    })
}

/// `base` with its fragment replaced by the encoded settings.
pub fn share_url(base: &str, settings: &Settings) -> String {
    let base = base.split_once('#').map_or(base, |(b, _)| b);
    format!("{base}#{FRAGMENT_KEY}={}", encode(settings))
}

#[cfg(test)]
#[path = "../../tests/unit/settings/codec.rs"]
mod tests;
