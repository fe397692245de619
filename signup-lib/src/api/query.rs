//! Cached read queries

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::CacheStatus;
use crate::Response;
use crate::SignupClient;
use crate::cache::CachedValue;
use crate::cache::cache_key;
use crate::error::ApiError;
use crate::error::Error;

impl SignupClient {
    /// Runs a cached `GET {base}{path}` under `tag`.
    ///
    /// Concurrent calls for the same tag and path share one request: the
    /// first caller fetches while the others wait and then read the cache.
    /// Results stay cached for the configured query TTL, until
    /// [`invalidate`](Self::invalidate) drops the tag, or until
    /// [`on_focus`](Self::on_focus) clears the cache.
    pub async fn query<T>(&self, tag: &str, path: &str) -> Result<Response<T>, Error>
    where
        T: DeserializeOwned + Serialize,
    {
        let config = &self.inner.cache_config;
        if !config.is_enabled() {
            return Ok(Response::new(self.fetch_json(path).await?, CacheStatus::None));
        }

        let key = cache_key(tag, path);
        let lock = self.inner.in_flight.entry(key.clone()).or_default().clone();
        let result = {
            let _guard = lock.lock().await;
            self.query_locked(&key, path).await
        };

        // Map entry plus our clone: nobody else is holding or waiting.
        self.inner
            .in_flight
            .remove_if(&key, |_, entry| Arc::strong_count(entry) == 2);

        result
    }

    async fn query_locked<T>(&self, key: &str, path: &str) -> Result<Response<T>, Error>
    where
        T: DeserializeOwned + Serialize,
    {
        if let Some(cached) = self.inner.cache.get(key).await {
            match serde_json::from_slice::<T>(&cached.data) {
                Ok(data) => {
                    log::debug!("Cache hit for {}", key);
                    return Ok(Response::new(data, CacheStatus::served(key, &cached)));
                }
                Err(e) => {
                    log::warn!("Dropping undecodable cache entry {}: {}", key, e);
                    self.inner.cache.remove(key).await;
                }
            }
        }

        let data: T = self.fetch_json(path).await?;
        let bytes = serde_json::to_vec(&data).map_err(|e| ApiError::parse(e.to_string()))?;
        let value = CachedValue::with_ttl(bytes, self.inner.cache_config.query_ttl);
        let response = Response::new(data, CacheStatus::stored(key, &value));
        self.inner.cache.set(key, value).await;

        Ok(response)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        let timeout = self.inner.timeout;
        log::debug!("GET {}", url);

        let response = self
            .request(Method::GET, &url)
            .send()
            .await
            .map_err(|e| ApiError::from_send(e, timeout))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::from_send(e, timeout))?;

        if !(200..300).contains(&status) {
            return Err(ApiError::http(status, &text));
        }

        match serde_json::from_str(&text) {
            Ok(data) => Ok(data),
            Err(e) => Err(ApiError::parse_with_body(e.to_string(), text)),
        }
    }
}
