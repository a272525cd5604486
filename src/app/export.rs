use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::error::{DriftError, DriftResult},
    render::surface::FrameRGBA,
};

/// File name of an export taken at `unix_ms`.
pub fn export_file_name(unix_ms: u64) -> String {
    format!("driftfield-{unix_ms}.png")
}

/// Write `frame` as a timestamped PNG inside `dir` and return its path.
///
/// Two exports in the same millisecond get a numeric suffix instead of overwriting each other.
#[tracing::instrument(skip(frame), fields(width = frame.width, height = frame.height))]
pub fn export_png(frame: &FrameRGBA, dir: &Path, unix_ms: u64) -> DriftResult<PathBuf> {
    let mut path = dir.join(export_file_name(unix_ms));
    let mut n = 1u32;
    while path.exists() {
        path = dir.join(format!("driftfield-{unix_ms}-{n}.png"));
        n += 1;
    }
    write_png(frame, &path)?;
    tracing::info!(path = %path.display(), "exported frame");
    Ok(path)
}

/// Encode `frame` as a lossless PNG at `path`, creating parent directories as needed.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> DriftResult<()> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.width == 0 || frame.height == 0 || frame.data.len() != expected {
        return Err(DriftError::export(format!(
            "frame buffer is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| DriftError::export(format!("write png '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/app/export.rs"]
mod tests;
