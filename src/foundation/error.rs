/// Result type used across the crate's fallible boundaries.
pub type CircuitResult<T> = Result<T, CircuitError>;

#[derive(thiserror::Error, Debug)]
/// Error type for configuration, geometry and rendering boundaries.
///
/// Runtime updates of the route field and the progress tracker never fail; absent
/// geometry and degenerate ranges are resolved in place. Errors only surface where a
/// host hands the crate something it cannot use.
pub enum CircuitError {
    /// Invalid configuration or input values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Geometry that cannot be mapped (zero-sized host, bad viewport).
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Rendering surface failures.
    #[error("render error: {0}")]
    Render(String),

    /// Serialization/deserialization failures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other wrapped error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CircuitError {
    /// Build a [`CircuitError::Validation`] error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CircuitError::Geometry`] error.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`CircuitError::Render`] error.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CircuitError::Serde`] error.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CircuitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
