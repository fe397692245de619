//! Submission pipeline tests against a scripted backend.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use signup_form::prelude::*;
use signup_form::form::{FALLBACK_MESSAGE, SUCCESS_MESSAGE};
use signup_lib::api::Created;
use signup_lib::error::{ApiError, Error};
use signup_lib::model::{FilePart, Payload};
use tokio::sync::Notify;

// =============================================================================
// Test doubles
// =============================================================================

enum Reply {
    Created(serde_json::Value),
    Http(u16, &'static str),
    Timeout,
}

#[derive(Clone, Default)]
struct ScriptedApi {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    calls: Arc<Mutex<Vec<Payload>>>,
    gate: Option<(Arc<Notify>, Arc<Notify>)>,
}

impl ScriptedApi {
    fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            ..Default::default()
        }
    }

    /// Blocks each call until `release` is notified; signals `entered` first.
    fn gated(mut self, entered: Arc<Notify>, release: Arc<Notify>) -> Self {
        self.gate = Some((entered, release));
        self
    }

    fn calls(&self) -> Vec<Payload> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserApi for ScriptedApi {
    async fn create_user(&self, payload: Payload) -> Result<Created, Error> {
        self.calls.lock().unwrap().push(payload);

        if let Some((entered, release)) = &self.gate {
            entered.notify_one();
            release.notified().await;
        }

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected create_user call");

        match reply {
            Reply::Created(body) => Ok(Created { status: 201, body }),
            Reply::Http(status, body) => Err(ApiError::http(status, body).into()),
            Reply::Timeout => Err(ApiError::Timeout(Duration::from_secs(30)).into()),
        }
    }
}

#[derive(Clone, Default)]
struct CountingRefresh(Arc<AtomicUsize>);

impl CountingRefresh {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Refresh for CountingRefresh {
    async fn refresh(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

struct Harness {
    form: SignupForm<ScriptedApi>,
    api: ScriptedApi,
    toasts: ToastQueue,
    refresh: CountingRefresh,
}

fn harness(api: ScriptedApi) -> Harness {
    let toasts = ToastQueue::new();
    let refresh = CountingRefresh::default();
    let form = SignupForm::new(api.clone(), toasts.clone(), refresh.clone());
    Harness {
        form,
        api,
        toasts,
        refresh,
    }
}

fn fill_alice(form: &SignupForm<ScriptedApi>) {
    form.on_field_change(FieldName::Name, "Alice Wonderland").unwrap();
    form.on_field_change(FieldName::Dob, "2000-01-01").unwrap();
    form.on_field_change(FieldName::Photo, "p.jpg").unwrap();
    form.on_field_change(FieldName::State, "CA").unwrap();
    form.on_field_change(FieldName::Country, "US").unwrap();
}

fn alice_record() -> serde_json::Value {
    serde_json::json!({
        "id": "u1",
        "name": "Alice Wonderland",
        "photo": "p.jpg",
        "country": "US",
        "dob": "2000-01-01"
    })
}

// =============================================================================
// Success
// =============================================================================

#[tokio::test]
async fn test_alice_end_to_end() {
    let h = harness(ScriptedApi::new([Reply::Created(alice_record())]));
    fill_alice(&h.form);

    let outcome = h.form.on_submit().await.unwrap();

    let SubmitOutcome::Created(created) = outcome else {
        panic!("expected Created, got {:?}", outcome);
    };
    assert_eq!(created.user().unwrap().id, "u1");

    let toasts = h.toasts.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, SUCCESS_MESSAGE);
    assert_eq!(toasts[0].title, "Registered Successfully");
    assert_eq!(toasts[0].level, ToastLevel::Success);

    assert_eq!(h.form.draft(), UserDraft::default());
    assert_eq!(h.refresh.count(), 1);
    assert_eq!(h.form.state(), SubmitState::Idle);
}

#[tokio::test]
async fn test_payload_carries_all_fields_in_order() {
    let h = harness(ScriptedApi::new([Reply::Created(alice_record())]));
    fill_alice(&h.form);

    h.form.on_submit().await.unwrap();

    let calls = h.api.calls();
    assert_eq!(calls.len(), 1);
    let payload = &calls[0];
    assert_eq!(payload.names(), vec!["name", "photo", "state", "dob", "country"]);
    assert_eq!(payload.get_text("name"), Some("Alice Wonderland"));
    assert_eq!(payload.get_text("photo"), Some("p.jpg"));
    assert_eq!(payload.get_text("state"), Some("CA"));
    assert_eq!(payload.get_text("dob"), Some("2000-01-01"));
    assert_eq!(payload.get_text("country"), Some("US"));
    assert!(payload.get("interests").is_none());
}

#[tokio::test]
async fn test_empty_optional_fields_are_sent() {
    let h = harness(ScriptedApi::new([Reply::Created(alice_record())]));
    h.form.on_field_change(FieldName::Name, "Alice").unwrap();

    let outcome = h.form.on_submit().await.unwrap();

    assert!(outcome.is_created());
    let payload = &h.api.calls()[0];
    assert_eq!(payload.len(), 5);
    assert_eq!(payload.get_text("country"), Some(""));
}

#[tokio::test]
async fn test_attachment_is_sent_as_file_and_cleared() {
    let h = harness(ScriptedApi::new([Reply::Created(alice_record())]));
    fill_alice(&h.form);
    h.form
        .attach_photo(FilePart::new(b"JPEG".to_vec(), "me.jpg").with_mime_type("image/jpeg"))
        .unwrap();

    h.form.on_submit().await.unwrap();

    let photo = h.api.calls()[0].get("photo").cloned().unwrap();
    assert_eq!(photo.as_file().map(|f| f.file_name.as_str()), Some("me.jpg"));
    assert!(h.form.attachment().is_none());
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_short_name_blocks_submission() {
    let h = harness(ScriptedApi::new([]));
    h.form.on_field_change(FieldName::Name, "Bob").unwrap();
    h.form.on_field_change(FieldName::Country, "US").unwrap();

    let outcome = h.form.on_submit().await.unwrap();

    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("expected Invalid, got {:?}", outcome);
    };
    assert_eq!(
        errors.for_field(FieldName::Name),
        Some("Name must be 5 or more characters long")
    );
    assert_eq!(
        h.form.field_error(FieldName::Name).as_deref(),
        Some("Name must be 5 or more characters long")
    );
    assert!(h.api.calls().is_empty());
    assert!(h.toasts.is_empty());
    assert_eq!(h.form.state(), SubmitState::Idle);
    assert_eq!(h.form.draft().country, "US");
}

#[tokio::test]
async fn test_long_name_blocks_submission() {
    let h = harness(ScriptedApi::new([]));
    h.form
        .on_field_change(FieldName::Name, "A".repeat(31))
        .unwrap();

    let outcome = h.form.on_submit().await.unwrap();

    assert!(matches!(
        outcome,
        SubmitOutcome::Invalid(ref errors)
            if errors.for_field(FieldName::Name) == Some("Name must be less than 30 characters")
    ));
    assert!(h.api.calls().is_empty());
}

#[tokio::test]
async fn test_correcting_input_clears_message_and_submits() {
    let h = harness(ScriptedApi::new([Reply::Created(alice_record())]));
    h.form.on_field_change(FieldName::Name, "Al").unwrap();
    h.form.on_submit().await.unwrap();
    assert!(h.form.field_error(FieldName::Name).is_some());

    h.form.on_field_change(FieldName::Name, "Alice Wonderland").unwrap();
    assert!(h.form.field_error(FieldName::Name).is_none());

    assert!(h.form.on_submit().await.unwrap().is_created());
}

#[tokio::test]
async fn test_strict_schema_requires_country() {
    let h = harness(ScriptedApi::new([]));
    let form = h.form.clone().with_schema(SignupSchema::strict());
    form.on_field_change(FieldName::Name, "Alice Wonderland").unwrap();
    form.on_field_change(FieldName::State, "CA").unwrap();
    form.on_field_change(FieldName::Dob, "2000-01-01").unwrap();

    let outcome = form.on_submit().await.unwrap();

    let SubmitOutcome::Invalid(errors) = outcome else {
        panic!("expected Invalid, got {:?}", outcome);
    };
    assert_eq!(errors.errors().len(), 1);
    assert_eq!(errors.for_field(FieldName::Country), Some("Country is required"));
}

// =============================================================================
// Failure
// =============================================================================

#[tokio::test]
async fn test_structured_failure_shows_server_message() {
    let h = harness(ScriptedApi::new([Reply::Http(
        400,
        r#"{"errors":[{"message":"X"}]}"#,
    )]));
    fill_alice(&h.form);
    let before = h.form.draft();

    let outcome = h.form.on_submit().await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Failed(ref m) if m == "X"));
    let toasts = h.toasts.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, ToastLevel::Error);
    assert!(toasts[0].title.contains('X'));
    assert_eq!(toasts[0].title, "Something went wrong, X");

    assert_eq!(h.form.draft(), before);
    assert_eq!(h.refresh.count(), 0);
    assert_eq!(h.form.state(), SubmitState::Idle);
}

#[tokio::test]
async fn test_unknown_error_shape_uses_fallback() {
    let h = harness(ScriptedApi::new([Reply::Http(502, "<html>Bad Gateway</html>")]));
    fill_alice(&h.form);
    let before = h.form.draft();

    let outcome = h.form.on_submit().await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Failed(ref m) if m == FALLBACK_MESSAGE));
    let toasts = h.toasts.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(
        toasts[0].title,
        format!("Something went wrong, {}", FALLBACK_MESSAGE)
    );
    assert_eq!(h.form.draft(), before);
}

#[tokio::test]
async fn test_transport_failure_uses_fallback() {
    let h = harness(ScriptedApi::new([Reply::Timeout]));
    fill_alice(&h.form);

    let outcome = h.form.on_submit().await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Failed(ref m) if m == FALLBACK_MESSAGE));
    assert_eq!(h.form.draft().name, "Alice Wonderland");
}

#[tokio::test]
async fn test_retry_after_failure() {
    let h = harness(ScriptedApi::new([
        Reply::Http(409, r#"{"errors":[{"message":"Try again"}]}"#),
        Reply::Created(alice_record()),
    ]));
    fill_alice(&h.form);

    assert!(!h.form.on_submit().await.unwrap().is_created());
    assert!(h.form.on_submit().await.unwrap().is_created());

    assert_eq!(h.api.calls().len(), 2);
    let titles: Vec<String> = h.toasts.drain().into_iter().map(|t| t.title).collect();
    assert_eq!(
        titles,
        vec!["Something went wrong, Try again", "Registered Successfully"]
    );
    assert!(h.form.draft().is_empty());
}

// =============================================================================
// Disabled while submitting
// =============================================================================

#[tokio::test]
async fn test_inputs_disabled_while_submitting() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let api = ScriptedApi::new([Reply::Created(alice_record())])
        .gated(entered.clone(), release.clone());
    let h = harness(api);
    fill_alice(&h.form);

    assert!(!h.form.submit_disabled());

    let submitting = h.form.clone();
    let task = tokio::spawn(async move { submitting.on_submit().await });
    entered.notified().await;

    assert!(h.form.is_submitting());
    assert!(h.form.submit_disabled());
    assert!(FieldName::ALL.iter().all(|f| h.form.is_disabled(*f)));
    assert_eq!(
        h.form.on_field_change(FieldName::Name, "Mallory Intruder"),
        Err(FormError::Busy)
    );
    assert!(matches!(h.form.on_submit().await, Err(FormError::Busy)));

    release.notify_one();
    let outcome = task.await.unwrap().unwrap();

    assert!(outcome.is_created());
    assert!(!h.form.is_submitting());
    assert!(!h.form.submit_disabled());
    assert!(FieldName::ALL.iter().all(|f| !h.form.is_disabled(*f)));
    assert_eq!(h.api.calls().len(), 1);
}

#[tokio::test]
async fn test_inputs_reenabled_after_failure() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let api = ScriptedApi::new([Reply::Http(500, "")]).gated(entered.clone(), release.clone());
    let h = harness(api);
    fill_alice(&h.form);

    let submitting = h.form.clone();
    let task = tokio::spawn(async move { submitting.on_submit().await });
    entered.notified().await;
    assert!(h.form.is_submitting());

    release.notify_one();
    task.await.unwrap().unwrap();

    assert!(!h.form.is_submitting());
    assert!(h.form.on_field_change(FieldName::Name, "Alice Liddell").is_ok());
}
