use thiserror::Error;

#[derive(Debug, Error)]
pub enum CastlistError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("favorites data is corrupt: {0}")]
    CorruptFavorites(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}
