//! Error types for CrowdPulse

/// Result type alias using CrowdPulse's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for CrowdPulse operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The supplied video reference has no recognizable identifier
    #[error("invalid video reference format")]
    InvalidReference,

    /// The comment section is closed for the requested video
    #[error("comments are disabled for this video")]
    CommentsDisabled,

    /// The video has no comments to analyze
    #[error("no comments found")]
    NoCommentsFound,

    /// Comment retrieval errors
    #[error("comment fetch error: {0}")]
    Fetch(String),

    /// Classifier execution errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error should surface as a short user-facing message
    /// rather than a generic server fault.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidReference | Self::CommentsDisabled | Self::NoCommentsFound
        )
    }
}
