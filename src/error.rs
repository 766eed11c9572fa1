//! Structured error types for gridsizer.

/// All errors that can surface while resolving grid geometry.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A computed width setting failed for the given source column.
    #[error("width callback failed for column {index}: {message}")]
    WidthCallback { index: usize, message: String },

    /// A width setting holds a value no column can be drawn with.
    #[error("invalid setting `{name}`: {value}")]
    InvalidSetting { name: &'static str, value: f64 },

    /// Settings document could not be parsed.
    #[error("settings document: {0}")]
    Config(#[from] serde_json::Error),

    /// Catch-all for string errors raised by host callbacks.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}
