/// Convenience result type used across the crate.
pub type WarmingResult<T> = Result<T, WarmingError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant except [`WarmingError::Other`] is a deterministic fault of the request or the
/// configuration: retrying with identical input reproduces it.
#[derive(thiserror::Error, Debug)]
pub enum WarmingError {
    /// Kernel radius is non-positive or the inner radius does not leave an annulus.
    #[error("invalid radius: {0}")]
    InvalidRadius(String),

    /// Input grid has no cells, or every cell is nodata.
    #[error("empty grid: {0}")]
    EmptyGrid(String),

    /// Explicit rescale range is empty, inverted or non-finite.
    #[error("degenerate range: {0}")]
    DegenerateRange(String),

    /// Deforestation type is not one of the recognised values.
    #[error("invalid event type: {0}")]
    InvalidEventType(String),

    /// Invalid user-provided request or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised while computing a prediction.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WarmingError {
    /// Build a [`WarmingError::InvalidRadius`] value.
    pub fn invalid_radius(msg: impl Into<String>) -> Self {
        Self::InvalidRadius(msg.into())
    }

    /// Build a [`WarmingError::EmptyGrid`] value.
    pub fn empty_grid(msg: impl Into<String>) -> Self {
        Self::EmptyGrid(msg.into())
    }

    /// Build a [`WarmingError::DegenerateRange`] value.
    pub fn degenerate_range(msg: impl Into<String>) -> Self {
        Self::DegenerateRange(msg.into())
    }

    /// Build a [`WarmingError::InvalidEventType`] value.
    pub fn invalid_event_type(msg: impl Into<String>) -> Self {
        Self::InvalidEventType(msg.into())
    }

    /// Build a [`WarmingError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WarmingError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`WarmingError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the error is attributable to the caller's input or configuration.
    ///
    /// Wrapped IO and dependency failures return `false`; the surrounding service decides how to
    /// retry those.
    pub fn is_client_fault(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
