use thiserror::Error;

/// Errors that can occur while talking to the identity provider or the backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure (connection refused, timeout, bad body)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The identity provider rejected the request
    #[error("{0}")]
    Auth(String),

    /// The backend answered with a non-success status; `error` is the body's
    /// `error` field when it sent one
    #[error(
        "Backend returned {status}{}",
        .error.as_deref().map(|e| format!(": {e}")).unwrap_or_default()
    )]
    Backend { status: u16, error: Option<String> },

    /// An operation that needs a signed-in user was called without one
    #[error("No user is signed in")]
    NotSignedIn,

    /// Form input failed validation before any request was made
    #[error("{0}")]
    Validation(String),

    /// Reading a photo or the session file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Session file or response body could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// No Firebase web API key was configured
    #[error("Firebase API key not found in config or environment")]
    MissingApiKey,
}

impl ClientError {
    /// Message suitable for showing to the user as-is
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Backend {
                error: Some(error), ..
            } => error.clone(),
            other => other.to_string(),
        }
    }
}
