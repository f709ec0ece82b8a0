use reqwest::Client;
use url::Url;

use super::error::ApiError;
use super::types::{Show, ShowPreview};
use crate::traits::CatalogService;

pub const DEFAULT_BASE_URL: &str = "https://podcast-api.netlify.app";

/// Client for the read-only podcast catalog API.
pub struct PodcastApiClient {
    base_url: Url,
    http: Client,
}

impl PodcastApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: parse_base(base_url)?,
            http: Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Check the HTTP response for errors and return the body text on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "catalog API error");
            Err(ApiError::Api {
                status,
                message: body,
            })
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.base_url.join(path)?;
        tracing::debug!(%url, "fetching");

        let resp = self.http.get(url).send().await?;
        let resp = Self::check_response(resp).await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

impl Default for PodcastApiClient {
    fn default() -> Self {
        Self {
            base_url: Url::parse(&format!("{DEFAULT_BASE_URL}/"))
                .expect("built-in base URL is valid"),
            http: Client::new(),
        }
    }
}

impl CatalogService for PodcastApiClient {
    type Error = ApiError;

    async fn list_shows(&self) -> Result<Vec<ShowPreview>, ApiError> {
        let shows: Vec<ShowPreview> = self.get_json("shows").await?;
        tracing::debug!(count = shows.len(), "catalog loaded");
        Ok(shows)
    }

    async fn get_show(&self, id: &str) -> Result<Show, ApiError> {
        let id = id.trim();
        if id.is_empty() || id.contains('/') {
            return Err(ApiError::Parse(format!("invalid show id: {id:?}")));
        }
        self.get_json(&format!("id/{id}")).await
    }
}

/// Parse a base URL so that relative joins append to its path.
pub(crate) fn parse_base(base_url: &str) -> Result<Url, url::ParseError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    Url::parse(&format!("{trimmed}/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_joins() {
        let client = PodcastApiClient::new("https://podcast-api.netlify.app").unwrap();
        assert_eq!(
            client.base_url().join("shows").unwrap().as_str(),
            "https://podcast-api.netlify.app/shows"
        );

        let nested = PodcastApiClient::new("http://localhost:8080/api/").unwrap();
        assert_eq!(
            nested.base_url().join("id/42").unwrap().as_str(),
            "http://localhost:8080/api/id/42"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            PodcastApiClient::new("not a url"),
            Err(ApiError::Url(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_path_in_show_id() {
        let client = PodcastApiClient::default();
        assert!(matches!(
            client.get_show("../shows").await,
            Err(ApiError::Parse(_))
        ));
        assert!(matches!(client.get_show("  ").await, Err(ApiError::Parse(_))));
    }
}
