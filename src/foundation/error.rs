/// Convenience result type used across cornermask.
pub type MaskResult<T> = Result<T, MaskError>;

/// Error taxonomy for the fallible parts of the crate. Masking itself never fails.
#[derive(thiserror::Error, Debug)]
pub enum MaskError {
    /// Invalid user-provided data: bitmap sizes, view attributes.
    #[error("validation error: {0}")]
    Validation(String),

    /// A surface could not be created or read back.
    #[error("surface error: {0}")]
    Surface(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MaskError {
    /// Build a [`MaskError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MaskError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`MaskError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
