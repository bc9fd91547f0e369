pub type Result<T> = std::result::Result<T, Error>;

/// Semantic category of a backend failure.
///
/// The backend signals error kinds only through human-readable message text,
/// so classification happens here, in exactly one place. Screens branch on
/// the kind, never on message substrings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Unauthorized,
    Other,
}

impl ErrorKind {
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("record not found") || lower.contains("not found") {
            ErrorKind::NotFound
        } else if lower.contains("unauthorized") || lower.contains("no autorizado") {
            ErrorKind::Unauthorized
        } else {
            ErrorKind::Other
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// `success: false` envelope returned by a named operation. The message
    /// is surfaced verbatim to the user.
    #[error("{message}")]
    Api { kind: ErrorKind, message: String },

    /// GraphQL-level error entries on the response.
    #[error("{message}")]
    Graphql { kind: ErrorKind, message: String },

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn api(message: impl Into<String>) -> Self {
        let message = message.into();
        Error::Api {
            kind: ErrorKind::classify(&message),
            message,
        }
    }

    pub fn graphql(message: impl Into<String>) -> Self {
        let message = message.into();
        Error::Graphql {
            kind: ErrorKind::classify(&message),
            message,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Api { kind, .. } | Error::Graphql { kind, .. } => *kind,
            Error::Unauthorized(_) => ErrorKind::Unauthorized,
            _ => ErrorKind::Other,
        }
    }
}
