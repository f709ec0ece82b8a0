//! Trait definitions for podcast catalog sources.
//!
//! The HTTP client implements this trait so the loader and the views can
//! be tested against an in-process fake.

use std::future::Future;

use crate::catalog::types::{Show, ShowPreview};

/// A read-only podcast catalog.
pub trait CatalogService: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the full catalog in summary form.
    fn list_shows(&self) -> impl Future<Output = Result<Vec<ShowPreview>, Self::Error>> + Send;

    /// Fetch one show with all of its seasons and episodes.
    fn get_show(&self, id: &str) -> impl Future<Output = Result<Show, Self::Error>> + Send;
}
