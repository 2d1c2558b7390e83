use thiserror::Error;

// Everything that can stop a range from being generated.
// All failures happen before the first random draw, so a call either
// returns a complete point list or one of these.
#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl TerrainError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        TerrainError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TerrainError>;
