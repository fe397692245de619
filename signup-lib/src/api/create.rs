//! Create-user operation
//!
//! # Example
//!
//! ```ignore
//! use signup_lib::model::Payload;
//!
//! let payload = Payload::new()
//!     .text("name", "Alice Wonderland")
//!     .text("country", "US");
//!
//! let created = client.create_user(payload).await?;
//! println!("{:?}", created.user()?);
//! ```

use reqwest::Method;

use crate::SignupClient;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Payload;
use crate::model::User;

/// Cache tag for queries derived from user records.
pub const USERS_TAG: &str = "users";

/// Path of the create endpoint, relative to the base URL.
pub const CREATE_PATH: &str = "/create";

/// Successful create response.
#[derive(Debug, Clone, PartialEq)]
pub struct Created {
    /// HTTP status code (2xx).
    pub status: u16,
    /// Response body. A non-JSON body is kept as a JSON string.
    pub body: serde_json::Value,
}

impl Created {
    /// Parses the body as a [`User`] record.
    pub fn user(&self) -> Result<User, ApiError> {
        serde_json::from_value(self.body.clone())
            .map_err(|e| ApiError::parse_with_body(e.to_string(), self.body.to_string()))
    }
}

impl SignupClient {
    /// Creates a user with a single `POST {base}/create`.
    ///
    /// The payload is sent as a multipart body. On success every cached
    /// query under [`USERS_TAG`] is invalidated. No retries are attempted.
    pub async fn create_user(&self, payload: Payload) -> Result<Created, Error> {
        let url = self.endpoint(CREATE_PATH);
        log::debug!("POST {} fields={:?}", url, payload.names());

        let form = payload.into_form()?;
        let timeout = self.inner.timeout;

        let response = self
            .request(Method::POST, &url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::from_send(e, timeout))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::from_send(e, timeout))?;

        if !(200..300).contains(&status) {
            let err = ApiError::http(status, &text);
            if err.body().is_some_and(|body| body.is_unknown()) {
                log::warn!("POST {} returned {} with an unrecognised error body", url, status);
            }
            return Err(err.into());
        }

        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
        };

        self.invalidate(USERS_TAG).await;
        log::debug!("POST {} -> {}", url, status);

        Ok(Created { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_user_parses_body() {
        let created = Created {
            status: 201,
            body: serde_json::json!({
                "id": "u1",
                "name": "Alice Wonderland",
                "country": "US",
                "dob": "2000-01-01"
            }),
        };
        let user = created.user().unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.name, "Alice Wonderland");
    }

    #[test]
    fn test_created_user_rejects_other_shapes() {
        let created = Created {
            status: 200,
            body: serde_json::Value::String("ok".to_string()),
        };
        assert!(matches!(created.user(), Err(ApiError::Parse { .. })));
    }
}
