/// Convenience result type used across the crate.
pub type LaserCatResult<T> = Result<T, LaserCatError>;

/// Top-level error taxonomy used by batch APIs.
#[derive(thiserror::Error, Debug)]
pub enum LaserCatError {
    /// Malformed genotype identifiers or sprite data.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid user-provided records or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Broken cross-stage guarantees (missing trait vectors, double writes).
    #[error("invariant violation: {0}")]
    Invariant(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LaserCatError {
    /// Build a [`LaserCatError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`LaserCatError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LaserCatError::Invariant`] value.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// Build a [`LaserCatError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for LaserCatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
