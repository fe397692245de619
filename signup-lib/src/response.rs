//! Query results and where they came from

use chrono::DateTime;
use chrono::Utc;

use crate::cache::CachedValue;

/// Where a query result came from.
///
/// Cached variants carry the `<tag>:<path>` key of their entry, so callers
/// can tell which [`invalidate`](crate::SignupClient::invalidate) tag drops it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheStatus {
    /// Caching is disabled; the backend was asked directly.
    None,
    /// Fetched from the backend and stored under `key`.
    Miss {
        key: String,
        expires_at: DateTime<Utc>,
    },
    /// Served from the entry stored under `key`.
    Hit {
        key: String,
        cached_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    },
}

impl CacheStatus {
    pub(crate) fn stored(key: &str, value: &CachedValue) -> Self {
        Self::Miss {
            key: key.to_string(),
            expires_at: value.expires_at,
        }
    }

    pub(crate) fn served(key: &str, value: &CachedValue) -> Self {
        Self::Hit {
            key: key.to_string(),
            cached_at: value.created_at,
            expires_at: value.expires_at,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss { .. })
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The cache tag the entry lives under.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Miss { key, .. } | Self::Hit { key, .. } => {
                key.split_once(':').map(|(tag, _)| tag)
            }
        }
    }

    /// When the entry stops being served.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::None => None,
            Self::Miss { expires_at, .. } | Self::Hit { expires_at, .. } => Some(*expires_at),
        }
    }
}

/// A query result.
///
/// # Example
///
/// ```ignore
/// let users = client.query::<Vec<User>>("users", "/users").await?;
///
/// if users.is_cached() {
///     log::debug!("users from cache tag {:?}", users.cache.tag());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    data: T,
    pub cache: CacheStatus,
}

impl<T> Response<T> {
    pub(crate) fn new(data: T, cache: CacheStatus) -> Self {
        Self { data, cache }
    }

    /// Returns `true` if the data was served from the cache.
    pub fn is_cached(&self) -> bool {
        self.cache.is_hit()
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_inner(self) -> T {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::cache_key;
    use std::time::Duration;

    #[test]
    fn test_status_carries_tag_and_expiry() {
        let key = cache_key("users", "/users?page=2");
        let value = CachedValue::with_ttl(b"[]".to_vec(), Duration::from_secs(60));

        let miss = CacheStatus::stored(&key, &value);
        assert!(miss.is_miss());
        assert_eq!(miss.tag(), Some("users"));
        assert_eq!(miss.expires_at(), Some(value.expires_at));

        let hit = Response::new(1, CacheStatus::served(&key, &value));
        assert!(hit.is_cached());
        assert_eq!(hit.cache.tag(), Some("users"));
    }

    #[test]
    fn test_uncached_status_has_no_tag() {
        let response = Response::new("x", CacheStatus::None);
        assert!(!response.is_cached());
        assert!(response.cache.is_none());
        assert_eq!(response.cache.tag(), None);
        assert_eq!(response.into_inner(), "x");
    }
}
