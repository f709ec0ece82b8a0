pub mod auth;
pub mod catalog;
pub mod traits;

pub use catalog::{ApiError, PodcastApiClient};
pub use traits::CatalogService;
