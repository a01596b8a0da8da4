use crate::adapters::outbound::product_payload::ProductPayload;
use crate::ports::outbound::ProductFetcher;
use crate::shared::error::FetchError;
use crate::shared::Result;
use crate::traceability::domain::ProductNode;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HttpProductFetcher adapter for the external product service
///
/// Implements the ProductFetcher port over the service's REST API:
/// - `GET {base}/products/{id}` for a single product
/// - `GET {base}/products?ids=a,b` for a batch
///
/// # Error Mapping
/// - 404 → `FetchError::NotFound`
/// - 401 / 403 → `FetchError::AccessDenied`
/// - anything else (connection errors, 5xx, malformed bodies) →
///   `FetchError::Transport` once the retries are used up
pub struct HttpProductFetcher {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl HttpProductFetcher {
    const TIMEOUT_SECONDS: u64 = 10;
    const DEFAULT_MAX_RETRIES: u32 = 3;
    const MAX_BATCH_SIZE: usize = 100;

    /// Creates a new client for the product service at `base_url`
    ///
    /// # Errors
    /// Fails when the URL is not an absolute http(s) URL or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid product service URL '{}': {}", base_url, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!(
                "Invalid product service URL '{}': only http and https are supported",
                base_url
            );
        }

        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("supply-trace/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: Self::DEFAULT_MAX_RETRIES,
        })
    }

    /// Overrides the number of attempts made for transport failures
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Rejects ids that would escape the `/products/` path segment
    ///
    /// Such ids cannot name a product, so they are reported as not found
    /// without touching the network.
    fn validate_id(id: &str) -> std::result::Result<(), FetchError> {
        let unsafe_id = id.trim().is_empty()
            || id.contains('/')
            || id.contains('\\')
            || id.contains("..")
            || id.contains('#')
            || id.contains('?')
            || id.contains('@');
        if unsafe_id {
            tracing::debug!(id, "Rejecting product id with URL-unsafe characters");
            return Err(FetchError::NotFound { id: id.to_string() });
        }
        Ok(())
    }

    fn product_url(&self, id: &str) -> String {
        format!("{}/products/{}", self.base_url, urlencoding::encode(id))
    }

    fn batch_url(&self, ids: &[&str]) -> String {
        let encoded: Vec<String> = ids
            .iter()
            .map(|id| urlencoding::encode(id).into_owned())
            .collect();
        format!("{}/products?ids={}", self.base_url, encoded.join(","))
    }

    /// Maps a non-success status to the fetch error it stands for
    fn classify_status(status: StatusCode, id: &str) -> FetchError {
        match status {
            StatusCode::NOT_FOUND => FetchError::NotFound { id: id.to_string() },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                FetchError::AccessDenied { id: id.to_string() }
            }
            other => FetchError::Transport {
                details: format!("product service returned status code {}", other),
            },
        }
    }

    /// Sends a GET request, retrying only transport failures
    async fn get_with_retry<T: DeserializeOwned>(
        &self,
        url: &str,
        subject: &str,
    ) -> std::result::Result<T, FetchError> {
        let mut last_error = FetchError::Transport {
            details: "no attempt was made".to_string(),
        };

        for attempt in 1..=self.max_retries {
            match self.get_once(url, subject).await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_transport() => {
                    tracing::debug!(url, attempt, error = %e, "Product service request failed");
                    last_error = e;
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error)
    }

    async fn get_once<T: DeserializeOwned>(
        &self,
        url: &str,
        subject: &str,
    ) -> std::result::Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                details: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::classify_status(status, subject));
        }

        response.json::<T>().await.map_err(|e| FetchError::Transport {
            details: format!("malformed response for {}: {}", subject, e),
        })
    }
}

// Note: no Default implementation; building the client can fail.

#[async_trait]
impl ProductFetcher for HttpProductFetcher {
    async fn fetch_product_by_id(&self, id: &str) -> std::result::Result<ProductNode, FetchError> {
        Self::validate_id(id)?;
        self.get_with_retry(&self.product_url(id), id).await
    }

    async fn fetch_products_by_ids(
        &self,
        ids: &[String],
    ) -> std::result::Result<Vec<ProductNode>, FetchError> {
        let valid: Vec<&str> = ids
            .iter()
            .map(String::as_str)
            .filter(|id| Self::validate_id(id).is_ok())
            .collect();

        let mut found = Vec::with_capacity(valid.len());
        for chunk in valid.chunks(Self::MAX_BATCH_SIZE) {
            let subject = chunk.join(",");
            let payload: ProductPayload =
                self.get_with_retry(&self.batch_url(chunk), &subject).await?;
            found.extend(payload.into_products());
        }
        Ok(found)
    }

    fn supports_batch(&self) -> bool {
        true
    }
}
