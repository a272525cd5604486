/// Convenience result type used across driftfield.
pub type DriftResult<T> = Result<T, DriftError>;

/// Top-level error taxonomy.
///
/// Malformed or out-of-range *data* never reaches this type: share payloads and stored values
/// degrade to defaults, numeric fields are clamped. Only missing rendering resources and IO on
/// explicit commands are reported as errors.
#[derive(thiserror::Error, Debug)]
pub enum DriftError {
    /// The drawing surface could not be acquired. Fatal to the render loop.
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// Durable key/value storage failed on an explicit write or read.
    #[error("storage error: {0}")]
    Storage(String),

    /// Raster export failed.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DriftError {
    /// Build a [`DriftError::SurfaceUnavailable`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::SurfaceUnavailable(msg.into())
    }

    /// Build a [`DriftError::Storage`] value.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Build a [`DriftError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`DriftError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for the one error class that stops the render loop for good.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::SurfaceUnavailable(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
