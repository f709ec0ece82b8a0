use castlist_api::catalog::{Show, ShowPreview};
use castlist_api::CatalogService;
use tracing::{debug, error};

use crate::models::LoadStatus;

/// Fetches catalog data and reports it as a [`LoadStatus`].
///
/// Each call is an independent request: no caching, retry or
/// de-duplication. Failures are logged and returned as `Failed` so the
/// caller can show an error instead of an empty view.
pub struct CatalogLoader<C> {
    service: C,
}

impl<C: CatalogService> CatalogLoader<C> {
    pub fn new(service: C) -> Self {
        Self { service }
    }

    pub async fn shows(&self) -> LoadStatus<Vec<ShowPreview>> {
        match self.service.list_shows().await {
            Ok(shows) => {
                debug!(count = shows.len(), "catalog ready");
                LoadStatus::Ready(shows)
            }
            Err(e) => {
                error!(error = %e, "failed to load catalog");
                LoadStatus::Failed(e.to_string())
            }
        }
    }

    pub async fn show(&self, id: &str) -> LoadStatus<Show> {
        match self.service.get_show(id).await {
            Ok(show) => {
                debug!(id, seasons = show.seasons.len(), "show ready");
                LoadStatus::Ready(show)
            }
            Err(e) => {
                error!(id, error = %e, "failed to load show");
                LoadStatus::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, thiserror::Error)]
    #[error("offline")]
    struct Offline;

    struct FakeCatalog {
        online: bool,
        calls: AtomicUsize,
    }

    impl FakeCatalog {
        fn new(online: bool) -> Self {
            Self {
                online,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl CatalogService for FakeCatalog {
        type Error = Offline;

        async fn list_shows(&self) -> Result<Vec<ShowPreview>, Offline> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.online {
                return Err(Offline);
            }
            Ok(vec![ShowPreview {
                id: "1".into(),
                title: "Daily".into(),
                description: String::new(),
                image: String::new(),
                updated: "2023-01-01".into(),
                genres: vec![8],
                seasons: 2,
            }])
        }

        async fn get_show(&self, id: &str) -> Result<Show, Offline> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.online {
                return Err(Offline);
            }
            Ok(Show {
                id: id.into(),
                title: "Daily".into(),
                description: String::new(),
                image: String::new(),
                updated: "2023-01-01".into(),
                genres: vec![8],
                seasons: vec![],
            })
        }
    }

    #[tokio::test]
    async fn test_ready() {
        let loader = CatalogLoader::new(FakeCatalog::new(true));
        let shows = loader.shows().await;
        assert_eq!(shows.ready().map(Vec::len), Some(1));

        let show = loader.show("1").await;
        assert_eq!(show.ready().map(|s| s.id.as_str()), Some("1"));
    }

    #[tokio::test]
    async fn test_failure_is_reported() {
        let loader = CatalogLoader::new(FakeCatalog::new(false));
        assert_eq!(loader.shows().await, LoadStatus::Failed("offline".into()));
        assert_eq!(loader.show("1").await.error(), Some("offline"));
    }

    #[tokio::test]
    async fn test_no_caching() {
        let loader = CatalogLoader::new(FakeCatalog::new(true));
        loader.shows().await;
        loader.shows().await;
        assert_eq!(loader.service.calls.load(Ordering::SeqCst), 2);
    }
}
