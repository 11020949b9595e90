/// Convenience result alias used across the crate.
pub type SweepResult<T> = Result<T, SweepError>;

/// Error type for configuration, rendering and encoding failures.
#[derive(thiserror::Error, Debug)]
pub enum SweepError {
    /// A configuration value or input violated a documented constraint.
    #[error("validation error: {0}")]
    Validation(String),

    /// Rasterizing or text shaping failed.
    #[error("render error: {0}")]
    Render(String),

    /// Writing frame files or driving the video encoder failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Reading or writing configuration JSON failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, usually I/O with attached context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SweepError {
    /// Build a [`SweepError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SweepError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SweepError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SweepError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
