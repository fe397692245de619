//! Hook for re-fetching server-derived views after a successful submit.

use async_trait::async_trait;
use signup_lib::SignupClient;
use signup_lib::api::USERS_TAG;

/// Re-fetches whatever the user is looking at after a mutation.
#[async_trait]
pub trait Refresh: Send + Sync {
    async fn refresh(&self);
}

/// A refresh that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRefresh;

#[async_trait]
impl Refresh for NoRefresh {
    async fn refresh(&self) {}
}

/// Drops cached user queries so views read fresh data next time.
#[async_trait]
impl Refresh for SignupClient {
    async fn refresh(&self) {
        self.invalidate(USERS_TAG).await;
    }
}
