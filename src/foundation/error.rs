/// Convenience result type used across arcana.
pub type ArcanaResult<T> = Result<T, ArcanaError>;

/// Top-level error taxonomy used by reading APIs.
#[derive(thiserror::Error, Debug)]
pub enum ArcanaError {
    /// A contract the caller had to honor was broken (deck too small, unusable font, bad config).
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// Asset files that could not be found or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// The text backend answered with something other than an interpretation.
    #[error("backend error: {0}")]
    Backend(String),

    /// Transport-level failure talking to the text backend.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Interpreter failure, wrapped with the reading context.
    #[error("failed to read interpretation: {0}")]
    Interpretation(#[source] Box<ArcanaError>),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ArcanaError {
    /// Build a [`ArcanaError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`ArcanaError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ArcanaError::Backend`] value.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Build a [`ArcanaError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Wrap an interpreter error so callers can tell where the reading stopped.
    pub fn interpretation(source: ArcanaError) -> Self {
        Self::Interpretation(Box::new(source))
    }
}

impl From<serde_json::Error> for ArcanaError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}
