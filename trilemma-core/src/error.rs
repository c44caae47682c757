#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("Separation must be positive and finite, got {0}")]
    InvalidSeparation(f64),

    #[error("Rotation must be finite, got {0}")]
    InvalidRotation(f64),

    #[error("Centroid must be finite, got ({0}, {1})")]
    InvalidCentroid(f64, f64),
}

/// Failures from a [`TextGenerator`](crate::generate::TextGenerator).
///
/// The shell collapses all of these into one user-facing message; the variants
/// only exist so the cause can be logged.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("No API key configured")]
    MissingApiKey,

    #[error("Request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LogLevelError {
    #[error("Invalid log level: {0:?}")]
    Invalid(String),
}
