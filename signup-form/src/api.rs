//! The backend seam used by the form.

use async_trait::async_trait;
use signup_lib::SignupClient;
use signup_lib::api::{Created, UserCreateMutation};
use signup_lib::error::Error;
use signup_lib::model::Payload;

/// Something that can create a user from a payload.
///
/// Implemented for [`SignupClient`] and [`UserCreateMutation`]; tests provide
/// scripted implementations.
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn create_user(&self, payload: Payload) -> Result<Created, Error>;
}

#[async_trait]
impl UserApi for SignupClient {
    async fn create_user(&self, payload: Payload) -> Result<Created, Error> {
        SignupClient::create_user(self, payload).await
    }
}

#[async_trait]
impl UserApi for UserCreateMutation {
    async fn create_user(&self, payload: Payload) -> Result<Created, Error> {
        self.trigger(payload).await
    }
}
