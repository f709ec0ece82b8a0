use castlist_api::auth::AuthError;
use castlist_api::ApiError;
use castlist_core::error::CastlistError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CastlistError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("could not load {what}: {message}")]
    Load { what: String, message: String },

    #[error("not found: {0}")]
    NotFound(String),
}
