//! Integration test against a running signup backend.
//!
//! Ignored by default. To run it, create a `.env` file in the signup-lib
//! directory with:
//!
//! ```env
//! SIGNUP_API_URL=http://localhost:5000
//! ```
//!
//! Then run: `cargo test -p signup-lib -- --ignored`

use std::env;

use signup_lib::SignupClient;
use signup_lib::model::Payload;

fn load_env() -> Option<String> {
    let _ = dotenvy::dotenv();
    env::var("SIGNUP_API_URL").ok()
}

#[tokio::test]
#[ignore = "requires a running backend configured in .env"]
async fn test_create_user_live() {
    let url = load_env().expect("Missing SIGNUP_API_URL. See module docs.");
    let client = SignupClient::builder().url(url).build().unwrap();

    let suffix = chrono::Utc::now().timestamp_millis() % 100_000;
    let payload = Payload::new()
        .text("name", format!("Live Test {}", suffix))
        .text("photo", "")
        .text("state", "CA")
        .text("dob", "2000-01-01")
        .text("country", "US");

    match client.create_user(payload).await {
        Ok(created) => println!("Created: {}", created.body),
        Err(e) => println!("Backend rejected the user: {} ({:?})", e, e.first_message()),
    }
}
