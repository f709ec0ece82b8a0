pub mod client;
pub mod error;
pub mod types;

pub use client::PodcastApiClient;
pub use error::ApiError;
pub use types::{Episode, Season, Show, ShowPreview};
