/// Convenience result type used across the crate.
pub type SpacebattleResult<T> = Result<T, SpacebattleError>;

/// Top-level error taxonomy for composition and output.
#[derive(thiserror::Error, Debug)]
pub enum SpacebattleError {
    /// A caller-supplied value broke a precondition (bad config, mismatched frame size).
    #[error("validation error: {0}")]
    Validation(String),

    /// A blit would write outside its target canvas.
    #[error("out of bounds: {0}")]
    OutOfBounds(String),

    /// A window surface or encoder could not be acquired.
    #[error("resource unavailable: {0}")]
    Resource(String),

    /// The video stream rejected a frame or failed to finalize.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing snapshots and configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpacebattleError {
    /// Build a [`SpacebattleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SpacebattleError::OutOfBounds`] value.
    pub fn out_of_bounds(msg: impl Into<String>) -> Self {
        Self::OutOfBounds(msg.into())
    }

    /// Build a [`SpacebattleError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`SpacebattleError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SpacebattleError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
