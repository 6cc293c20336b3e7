//! HTTP page fetching for KdramaHood
//!
//! The extractors only depend on the [`PageFetcher`] trait: given a URL it
//! returns the page body together with the post-redirect URL, or fails.
//! [`HoodClient`] is the reqwest-backed implementation used in production.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use tracing::debug;

use crate::error::{KdramaError, Result};

/// Default User-Agent mimicking a modern browser
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default Accept-Language header
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// A fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Raw HTML body
    pub html: String,
    /// URL after following redirects
    pub final_url: String,
    /// HTTP status code of the final response
    pub status: u16,
}

/// Boxed future returned by [`PageFetcher::fetch`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<FetchedPage>> + Send + 'a>>;

/// Fetch a document or fail.
///
/// Implementations must map both transport errors and non-success statuses
/// to [`KdramaError::FetchFailure`].
pub trait PageFetcher: Send + Sync {
    /// Fetch the page at `url`.
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a>;
}

/// Configuration for the KdramaHood HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP client for KdramaHood pages.
///
/// Redirects are followed and every request is issued once; there is no
/// retry or throttling layer.
pub struct HoodClient {
    client: reqwest::Client,
}

impl HoodClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client })
    }

    /// Fetch an absolute URL.
    ///
    /// # Errors
    /// - `KdramaError::FetchFailure` - network error or non-2xx status
    pub async fn get(&self, url: &str) -> Result<FetchedPage> {
        debug!(url, "fetching page");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let final_url = response.url().to_string();

        if !status.is_success() {
            return Err(KdramaError::FetchFailure(format!(
                "HTTP status {} for {}",
                status.as_u16(),
                url
            )));
        }

        let html = response.text().await?;
        debug!(url, final_url = %final_url, bytes = html.len(), "page fetched");

        Ok(FetchedPage {
            html,
            final_url,
            status: status.as_u16(),
        })
    }
}

impl PageFetcher for HoodClient {
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(self.get(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_client_creation() {
        assert!(HoodClient::new().is_ok());
    }

    #[test]
    fn test_client_with_custom_config() {
        let config = ClientConfig {
            timeout_secs: 5,
            user_agent: "kdramahood-tests".to_string(),
        };
        assert!(HoodClient::with_config(config).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_success_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dh/itaewon/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let client = HoodClient::new().unwrap();
        let url = format!("{}/dh/itaewon/", server.uri());
        let page = client.fetch(&url).await.unwrap();

        assert_eq!(page.status, 200);
        assert_eq!(page.html, "<html>ok</html>");
        assert_eq!(page.final_url, url);
    }

    #[tokio::test]
    async fn test_fetch_follows_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dh/itaewon"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("Location", format!("{}/dh/itaewon/", server.uri()).as_str()),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dh/itaewon/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let client = HoodClient::new().unwrap();
        let page = client
            .fetch(&format!("{}/dh/itaewon", server.uri()))
            .await
            .unwrap();

        assert_eq!(page.final_url, format!("{}/dh/itaewon/", server.uri()));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nt/missing-ep-1/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = HoodClient::new().unwrap();
        let result = client
            .fetch(&format!("{}/nt/missing-ep-1/", server.uri()))
            .await;

        match result {
            Err(KdramaError::FetchFailure(msg)) => assert!(msg.contains("404")),
            other => panic!("Expected FetchFailure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let client = HoodClient::new().unwrap();
        let result = client.fetch(&format!("{}/dh/x/", server.uri())).await;
        assert!(matches!(result, Err(KdramaError::FetchFailure(_))));
    }
}
