//! Cache configuration

use std::time::Duration;

/// Configuration for the query cache.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use signup_lib::cache::CacheConfig;
///
/// let config = CacheConfig::default()
///     .with_query_ttl(Duration::from_secs(60))
///     .with_refetch_on_focus(false);
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for query results.
    ///
    /// Default: 5 minutes
    pub query_ttl: Duration,

    /// Whether regaining focus drops every cached query so it is refetched.
    ///
    /// Default: true
    pub refetch_on_focus: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            query_ttl: Duration::from_secs(300),
            refetch_on_focus: true,
        }
    }
}

impl CacheConfig {
    /// Creates a new cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the query TTL.
    pub fn with_query_ttl(mut self, ttl: Duration) -> Self {
        self.query_ttl = ttl;
        self
    }

    /// Enables or disables refetch-on-focus.
    pub fn with_refetch_on_focus(mut self, enabled: bool) -> Self {
        self.refetch_on_focus = enabled;
        self
    }

    /// Creates a config with no caching (zero TTL).
    pub fn no_cache() -> Self {
        Self {
            query_ttl: Duration::ZERO,
            refetch_on_focus: false,
        }
    }

    /// Returns `true` if query results are cached at all.
    pub fn is_enabled(&self) -> bool {
        !self.query_ttl.is_zero()
    }
}
