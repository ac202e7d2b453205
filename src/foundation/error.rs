/// Convenience result type used across rhotrace.
pub type TraceResult<T> = Result<T, TraceError>;

/// Top-level error taxonomy.
///
/// The parser and the animation loop never produce errors; everything here comes from the
/// edges of the system (file IO, configuration, surfaces and output sinks).
#[derive(thiserror::Error, Debug)]
pub enum TraceError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// A path file could not be selected or read.
    #[error("input error: {0}")]
    Input(String),

    /// A drawing surface could not be created or read back.
    #[error("render error: {0}")]
    Render(String),

    /// Writing frames to an output sink failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TraceError {
    /// Build a [`TraceError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TraceError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`TraceError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TraceError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`TraceError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
