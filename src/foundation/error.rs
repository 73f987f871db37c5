/// Convenience result type used across PosterCraft.
pub type PosterResult<T> = Result<T, PosterError>;

/// Top-level error taxonomy used by the design core.
///
/// None of these are fatal to an editing session: the [`crate::Editor`] turns each of them into
/// a transient status message and keeps the current design intact.
#[derive(thiserror::Error, Debug)]
pub enum PosterError {
    /// Invalid user-provided data (bad color, bad canvas size, undecodable image bytes).
    #[error("validation error: {0}")]
    Validation(String),

    /// The persisted design record exists but cannot be read back.
    #[error("malformed design state: {0}")]
    MalformedState(String),

    /// The template catalog could not be fetched or parsed.
    #[error("template fetch failure: {0}")]
    Fetch(String),

    /// The persisted slot could not be written or read.
    #[error("storage error: {0}")]
    Storage(String),

    /// The rasterizer rejected the poster surface.
    #[error("export failure: {0}")]
    Export(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PosterError {
    /// Build a [`PosterError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PosterError::MalformedState`] value.
    pub fn malformed_state(msg: impl Into<String>) -> Self {
        Self::MalformedState(msg.into())
    }

    /// Build a [`PosterError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`PosterError::Storage`] value.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Build a [`PosterError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
