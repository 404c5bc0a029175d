//! HTTP client for the turbopuffer vector API.

use std::sync::Arc;
use std::time::Instant;

use reqwest::{Client, Response};
use serde::Serialize;
use url::Url;

use super::{ApiKey, TurbopufferConfig};
use crate::TRACING_TARGET_CLIENT;
use crate::error::{Error, Result};
use crate::types::{QueryRequest, QueryResponse, QueryResult, UpsertRequest};

/// Upper bound on how much of an error body is kept.
const MAX_ERROR_BODY_CHARS: usize = 1024;

/// Inner client that holds the HTTP client and resolved settings.
struct ClientInner {
    http: Client,
    base_url: Url,
    namespace: String,
    api_key: ApiKey,
}

/// Client for a single turbopuffer namespace.
///
/// Cloning is cheap; clones share the underlying connection pool.
///
/// # Examples
///
/// ```rust,ignore
/// use tpuf_vector::{TurbopufferClient, TurbopufferConfig};
///
/// let config = TurbopufferConfig::default().with_namespace("docs");
/// let client = TurbopufferClient::new(&config)?;
/// let results = client.query(&request).await?;
/// ```
#[derive(Clone)]
pub struct TurbopufferClient {
    inner: Arc<ClientInner>,
}

impl TurbopufferClient {
    /// Creates a client, resolving the API key from the config or the
    /// `TURBOPUFFER_API_KEY` environment variable.
    ///
    /// No request is made.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] when no key is available and
    /// [`Error::InvalidConfig`] when the config is rejected.
    pub fn new(config: &TurbopufferConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        Self::with_api_key(config, api_key)
    }

    /// Creates a client with an already resolved API key.
    pub fn with_api_key(config: &TurbopufferConfig, api_key: ApiKey) -> Result<Self> {
        config.validate()?;

        let base_url = config.base_url()?;
        let namespace = config.namespace().to_owned();

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            base_url = %base_url,
            namespace = %namespace,
            timeout_secs = ?config.timeout_secs,
            "Creating turbopuffer client"
        );

        let mut builder = Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            Error::invalid_config(format!("failed to build HTTP client: {e}"))
        })?;

        let inner = ClientInner {
            http,
            base_url,
            namespace,
            api_key,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Returns the namespace this client targets.
    pub fn namespace(&self) -> &str {
        &self.inner.namespace
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Returns the upload endpoint, `{base}/vectors/{namespace}`.
    pub fn vectors_url(&self) -> Result<Url> {
        self.endpoint(&[])
    }

    /// Returns the query endpoint, `{base}/vectors/{namespace}/query`.
    pub fn query_url(&self) -> Result<Url> {
        self.endpoint(&["query"])
    }

    /// Uploads a batch of records in one request.
    ///
    /// Records whose ids already exist in the namespace are replaced.
    pub async fn upsert(&self, request: &UpsertRequest) -> Result<()> {
        let url = self.vectors_url()?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            namespace = %self.inner.namespace,
            count = request.len(),
            "Uploading vectors"
        );

        let started_at = Instant::now();
        self.post(url, request).await?;

        tracing::info!(
            target: TRACING_TARGET_CLIENT,
            namespace = %self.inner.namespace,
            count = request.len(),
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            "Vectors uploaded"
        );

        Ok(())
    }

    /// Runs a nearest-neighbour query and returns the results in service
    /// order.
    pub async fn query(&self, request: &QueryRequest) -> Result<Vec<QueryResult>> {
        let url = self.query_url()?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            namespace = %self.inner.namespace,
            k = request.k,
            distance_metric = %request.distance_metric,
            filtered = request.filters.is_some(),
            "Querying vectors"
        );

        let started_at = Instant::now();
        let response = self.post(url, request).await?;
        let body = response.bytes().await?;

        let parsed: QueryResponse = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_CLIENT,
                namespace = %self.inner.namespace,
                error = %e,
                "Unexpected query response shape"
            );
            Error::from(e)
        })?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            namespace = %self.inner.namespace,
            count = parsed.results.len(),
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            "Query completed"
        );

        Ok(parsed.results)
    }

    fn endpoint(&self, extra: &[&str]) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::invalid_config(format!("base url '{}' cannot be a base", self.inner.base_url))
            })?
            .pop_if_empty()
            .push("vectors")
            .push(&self.inner.namespace)
            .extend(extra);
        Ok(url)
    }

    /// Sends a JSON body and fails on transport errors or non-2xx statuses.
    async fn post<B>(&self, url: Url, body: &B) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let payload = serde_json::to_vec(body)
            .map_err(|e| Error::serialization(format!("failed to encode request: {e}")))?;

        let response = self
            .inner
            .http
            .post(url.clone())
            .bearer_auth(self.inner.api_key.expose())
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET_CLIENT,
                    url = %url,
                    error = %e,
                    "Request to turbopuffer failed"
                );
                Error::from(e)
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: String = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect();

        tracing::error!(
            target: TRACING_TARGET_CLIENT,
            url = %url,
            status = status.as_u16(),
            body = %body,
            "Turbopuffer returned an error status"
        );

        let message = if body.is_empty() {
            format!("HTTP {}", status.as_u16())
        } else {
            format!("HTTP {}: {body}", status.as_u16())
        };

        Err(Error::remote_service(Some(status.as_u16()), message))
    }
}

impl std::fmt::Debug for TurbopufferClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurbopufferClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("namespace", &self.inner.namespace)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::types::DistanceMetric;

    fn client_for(server: &MockServer, namespace: &str) -> TurbopufferClient {
        let config = TurbopufferConfig::default()
            .with_namespace(namespace)
            .with_base_url(Url::parse(&server.uri()).unwrap());
        TurbopufferClient::with_api_key(&config, ApiKey::new("test-key")).unwrap()
    }

    #[test]
    fn test_endpoints_on_default_base() {
        let config = TurbopufferConfig::default().with_namespace("docs");
        let client = TurbopufferClient::with_api_key(&config, ApiKey::new("k")).unwrap();

        assert_eq!(
            client.vectors_url().unwrap().as_str(),
            "https://api.turbopuffer.com/v1/vectors/docs"
        );
        assert_eq!(
            client.query_url().unwrap().as_str(),
            "https://api.turbopuffer.com/v1/vectors/docs/query"
        );
    }

    #[test]
    fn test_namespace_is_path_escaped() {
        let config = TurbopufferConfig::default().with_namespace("a/b");
        let client = TurbopufferClient::with_api_key(&config, ApiKey::new("k")).unwrap();

        assert_eq!(
            client.vectors_url().unwrap().as_str(),
            "https://api.turbopuffer.com/v1/vectors/a%2Fb"
        );
    }

    #[test]
    fn test_debug_hides_key() {
        let config = TurbopufferConfig::default();
        let client = TurbopufferClient::with_api_key(&config, ApiKey::new("tpuf_secret")).unwrap();
        assert!(!format!("{client:?}").contains("tpuf_secret"));
    }

    #[tokio::test]
    async fn test_upsert_sends_bearer_and_body() {
        let server = MockServer::start().await;
        let request = UpsertRequest::new(vec![7], vec![vec![0.5, 0.5]], Default::default());

        Mock::given(method("POST"))
            .and(path("/vectors/docs"))
            .and(header("Authorization", "Bearer test-key"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({
                "docIds": [7],
                "vectors": [[0.5, 0.5]],
                "attributes": {}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "OK"})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server, "docs").upsert(&request).await.unwrap();
    }

    #[tokio::test]
    async fn test_unencodable_body_is_not_sent() {
        let server = MockServer::start().await;
        let client = client_for(&server, "docs");

        let mut body = std::collections::BTreeMap::new();
        body.insert((1u8, 2u8), 3u8);
        let err = client
            .post(client.vectors_url().unwrap(), &body)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Serialization(_)));
        assert!(err.is_local());
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_error_status_becomes_remote_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/vectors/docs/query"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let request = QueryRequest::new(vec![1.0], 3, DistanceMetric::CosineDistance);
        let err = client_for(&server, "docs").query(&request).await.unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("unauthorized"));
    }

    #[tokio::test]
    async fn test_malformed_query_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/vectors/docs/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"hits": []})))
            .mount(&server)
            .await;

        let request = QueryRequest::new(vec![1.0], 3, DistanceMetric::CosineDistance);
        let err = client_for(&server, "docs").query(&request).await.unwrap_err();

        assert!(matches!(err, Error::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let config = TurbopufferConfig::default()
            .with_base_url(Url::parse("http://127.0.0.1:1/").unwrap())
            .with_timeout_secs(5);
        let client = TurbopufferClient::with_api_key(&config, ApiKey::new("k")).unwrap();

        let request = QueryRequest::new(vec![1.0], 1, DistanceMetric::EuclideanSquared);
        let err = client.query(&request).await.unwrap_err();

        assert!(matches!(err, Error::RemoteService { status: None, .. }));
    }
}
