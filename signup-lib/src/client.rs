//! Main SignupClient

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use reqwest::Client;
use reqwest::Method;
use reqwest::RequestBuilder;
use url::Url;

use crate::cache::CacheConfig;
use crate::cache::CacheProvider;
use crate::cache::InMemoryCache;
use crate::error::ApiError;

/// Origin used when no URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// The client for the signup backend.
///
/// Construct it once at startup and hand clones to whatever needs it; clones
/// share the HTTP connection pool and the query cache.
///
/// # Example
///
/// ```ignore
/// use signup_lib::SignupClient;
///
/// let client = SignupClient::builder()
///     .url("http://localhost:5000")
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// let created = client.create_user(payload).await?;
/// ```
#[derive(Clone)]
pub struct SignupClient {
    pub(crate) inner: Arc<SignupClientInner>,
}

pub(crate) struct SignupClientInner {
    pub(crate) base_url: String,
    pub(crate) http_client: Client,
    pub(crate) timeout: Option<Duration>,
    pub(crate) cache: Arc<dyn CacheProvider>,
    pub(crate) cache_config: CacheConfig,
    /// One lock per cache key so identical queries share a single fetch.
    pub(crate) in_flight: DashMap<String, Arc<tokio::sync::Mutex<()>>>,
}

impl SignupClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> SignupClientBuilder<Missing> {
        SignupClientBuilder::new()
    }

    /// Builds a client for [`DEFAULT_BASE_URL`] with default settings.
    pub fn local() -> Result<Self, ApiError> {
        Self::builder().url(DEFAULT_BASE_URL).build()
    }

    /// Returns the base URL of the backend.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the cache configuration.
    pub fn cache_config(&self) -> &CacheConfig {
        &self.inner.cache_config
    }

    /// Joins a path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    /// Drops every cached query under `tag`.
    ///
    /// Returns the number of entries removed.
    pub async fn invalidate(&self, tag: &str) -> usize {
        let removed = self.inner.cache.remove_prefix(&format!("{}:", tag)).await;
        if removed > 0 {
            log::debug!("Invalidated {} cached '{}' queries", removed, tag);
        }
        removed
    }

    /// Signals that the view regained focus.
    ///
    /// With refetch-on-focus enabled every cached query is dropped, so the
    /// next read goes to the network. Returns the number of entries removed.
    pub async fn on_focus(&self) -> usize {
        if !self.inner.cache_config.refetch_on_focus {
            return 0;
        }
        let removed = self.inner.cache.clear().await;
        log::debug!("Focus regained, dropped {} cached queries", removed);
        removed
    }

    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self.inner.http_client.request(method, url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        request
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`SignupClient`].
///
/// Uses the typestate pattern so `build()` is only available once a URL
/// has been given.
pub struct SignupClientBuilder<U> {
    url: U,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
    cache: Option<Arc<dyn CacheProvider>>,
    cache_config: CacheConfig,
}

impl SignupClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
            cache: None,
            cache_config: CacheConfig::default(),
        }
    }

    /// Sets the backend base URL.
    pub fn url(self, url: impl Into<String>) -> SignupClientBuilder<Set<String>> {
        SignupClientBuilder {
            url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            cache: self.cache,
            cache_config: self.cache_config,
        }
    }
}

impl Default for SignupClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> SignupClientBuilder<U> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// Ignored when a custom HTTP client is supplied.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the cache provider. Defaults to [`InMemoryCache`].
    pub fn cache<C: CacheProvider + 'static>(mut self, cache: C) -> Self {
        self.cache = Some(Arc::new(cache));
        self
    }

    /// Sets the cache configuration.
    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }
}

impl SignupClientBuilder<Set<String>> {
    /// Builds the [`SignupClient`].
    ///
    /// Fails if the URL is not an absolute `http`/`https` URL or the HTTP
    /// client cannot be created.
    pub fn build(self) -> Result<SignupClient, ApiError> {
        let raw = self.url.0;
        let parsed =
            Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                raw,
                parsed.scheme()
            )));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(InMemoryCache::new()) as Arc<dyn CacheProvider>);

        Ok(SignupClient {
            inner: Arc::new(SignupClientInner {
                base_url: raw.trim_end_matches('/').to_string(),
                http_client,
                timeout: self.timeout,
                cache,
                cache_config: self.cache_config,
                in_flight: DashMap::new(),
            }),
        })
    }
}
