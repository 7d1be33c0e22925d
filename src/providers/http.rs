use super::traits::{RecommendationProvider, SemanticSearchProvider};
use super::types::ProviderRequest;
use crate::models::ProviderRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Semantic search and recommendation service reached over HTTP.
///
/// `POST {base}/search` takes a [`ProviderRequest`] body, `GET
/// {base}/recommendations` takes none; both answer with a JSON array of
/// [`ProviderRecord`].
pub struct HttpProvider {
    client: Client,
    base_url: String,
}

impl HttpProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stay-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn read_records(response: Response, what: &str) -> Result<Vec<ProviderRecord>> {
        if !response.status().is_success() {
            warn!("{} returned status: {}", what, response.status());
            anyhow::bail!("{} failed: {}", what, response.status());
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read {} response body", what))?;
        debug!("Downloaded {} bytes from {}", body.len(), what);

        serde_json::from_str(&body).with_context(|| format!("Malformed {} response", what))
    }
}

#[async_trait]
impl SemanticSearchProvider for HttpProvider {
    async fn search(&self, request: &ProviderRequest) -> Result<Vec<ProviderRecord>> {
        let url = self.endpoint("search");
        debug!("Posting search to {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Failed to reach search provider")?;

        let records = Self::read_records(response, "Search provider").await?;
        info!("Search provider returned {} listings", records.len());
        Ok(records)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}

#[async_trait]
impl RecommendationProvider for HttpProvider {
    async fn recommend(&self) -> Result<Vec<ProviderRecord>> {
        let url = self.endpoint("recommendations");
        debug!("Fetching recommendations from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach recommendation provider")?;

        Self::read_records(response, "Recommendation provider").await
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves exactly one HTTP response and returns the base URL
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let _ = socket.read(&mut buf).await;
            let reply = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    fn local_provider(base: String) -> HttpProvider {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpProvider::with_client(client, base)
    }

    #[tokio::test]
    async fn test_decodes_recommendations() {
        let base = serve_once(
            "200 OK",
            r#"[{"id":"r1","title":"Quiet PG","description":"Meals","amenities":["food"],"price":7000,"location":"Alpha I","photoDataUri":"https://picsum.photos/seed/r1/600/400"}]"#,
        )
        .await;

        let provider = local_provider(base);
        let records = provider.recommend().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Quiet PG");
    }

    #[tokio::test]
    async fn test_error_status_is_failure() {
        let base = serve_once("503 Service Unavailable", "[]").await;
        let provider = local_provider(base);
        let request = ProviderRequest {
            query: "room".into(),
            campus: "Sharda University".into(),
            smart_search_active: true,
            price_range: None,
            amenities: None,
            property_type: None,
        };
        assert!(provider.search(&request).await.is_err());
    }

    #[tokio::test]
    async fn test_malformed_body_is_failure() {
        let base = serve_once("200 OK", r#"{"results": []}"#).await;
        let provider = local_provider(base);
        assert!(provider.recommend().await.is_err());
    }
}
