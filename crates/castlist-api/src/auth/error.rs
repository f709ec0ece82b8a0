use thiserror::Error;

/// Errors from the auth provider.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid auth URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("auth error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("auth provider is not configured")]
    NotConfigured,
}
