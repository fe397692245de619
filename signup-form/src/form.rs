//! The signup form and its submission pipeline.

use std::sync::{Arc, RwLock};

use signup_lib::api::Created;
use signup_lib::error::Error as ClientError;
use signup_lib::model::FilePart;

use crate::api::UserApi;
use crate::draft::{FieldName, UserDraft};
use crate::error::FormError;
use crate::field::Field;
use crate::refresh::Refresh;
use crate::schema::{SignupSchema, ValidationErrors};
use crate::toast::{Notifier, Toast};
use crate::validation::Validatable;

/// Shown after the backend accepts the user.
pub const SUCCESS_MESSAGE: &str = "Registered Successfully";

/// Shown when the failure carries no structured server message.
pub const FALLBACK_MESSAGE: &str = "please try again later";

/// Whether a submission is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
}

/// What happened to one submit attempt.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The backend created the user; the draft has been reset.
    Created(Created),
    /// The draft failed validation; nothing was sent.
    Invalid(ValidationErrors),
    /// The request failed; the draft is untouched. Holds the message shown.
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Headless signup form.
///
/// Clones share the same fields and state, so one task can submit while
/// another observes [`is_submitting`](Self::is_submitting).
pub struct SignupForm<A> {
    fields: [Field; 5],
    schema: SignupSchema,
    state: Arc<RwLock<SubmitState>>,
    attachment: Arc<RwLock<Option<FilePart>>>,
    api: Arc<A>,
    notifier: Arc<dyn Notifier>,
    refresher: Arc<dyn Refresh>,
}

impl<A> Clone for SignupForm<A> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            schema: self.schema,
            state: self.state.clone(),
            attachment: self.attachment.clone(),
            api: self.api.clone(),
            notifier: self.notifier.clone(),
            refresher: self.refresher.clone(),
        }
    }
}

impl<A: UserApi> SignupForm<A> {
    /// Create a form with empty fields and the lenient schema.
    pub fn new(
        api: A,
        notifier: impl Notifier + 'static,
        refresher: impl Refresh + 'static,
    ) -> Self {
        Self {
            fields: FieldName::ALL.map(Field::new),
            schema: SignupSchema::new(),
            state: Arc::new(RwLock::new(SubmitState::Idle)),
            attachment: Arc::new(RwLock::new(None)),
            api: Arc::new(api),
            notifier: Arc::new(notifier),
            refresher: Arc::new(refresher),
        }
    }

    /// Use a different schema.
    pub fn with_schema(mut self, schema: SignupSchema) -> Self {
        self.schema = schema;
        self
    }

    /// The handle for one input.
    pub fn field(&self, name: FieldName) -> &Field {
        // ALL and `fields` share an order.
        let index = FieldName::ALL
            .iter()
            .position(|f| *f == name)
            .unwrap_or_default();
        &self.fields[index]
    }

    /// All input handles in render order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Snapshot of the current values.
    pub fn draft(&self) -> UserDraft {
        let mut draft = UserDraft::default();
        for field in &self.fields {
            draft.set(field.name(), field.value());
        }
        draft
    }

    /// The validation message currently shown under a field.
    pub fn field_error(&self, name: FieldName) -> Option<String> {
        self.field(name).error()
    }

    pub fn state(&self) -> SubmitState {
        match self.state.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.state() == SubmitState::Submitting
    }

    /// Inputs are disabled while submitting.
    pub fn is_disabled(&self, _field: FieldName) -> bool {
        self.is_submitting()
    }

    /// The submit control is disabled while submitting.
    pub fn submit_disabled(&self) -> bool {
        self.is_submitting()
    }

    /// Update one field. No validation happens until submit.
    pub fn on_field_change(
        &self,
        field: FieldName,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        if self.is_submitting() {
            return Err(FormError::Busy);
        }
        self.field(field).set(value);
        Ok(())
    }

    /// Send `photo` as a file instead of its text value.
    pub fn attach_photo(&self, file: FilePart) -> Result<(), FormError> {
        if self.is_submitting() {
            return Err(FormError::Busy);
        }
        log::debug!("Attached photo {} ({} bytes)", file.file_name, file.len());
        self.set_attachment(Some(file));
        Ok(())
    }

    pub fn clear_attachment(&self) {
        self.set_attachment(None);
    }

    pub fn attachment(&self) -> Option<FilePart> {
        match self.attachment.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Empty every field, clear messages and drop the attachment.
    pub fn reset(&self) {
        for field in &self.fields {
            field.clear();
        }
        self.clear_attachment();
    }

    /// Validate, send and report the outcome.
    ///
    /// Validation failures leave the form idle with messages on the
    /// offending fields. Otherwise exactly one create request is made; a
    /// success resets the form and refreshes dependent views, a failure
    /// keeps the draft for another try.
    pub async fn on_submit(&self) -> Result<SubmitOutcome, FormError> {
        if self.is_submitting() {
            return Err(FormError::Busy);
        }

        let draft = self.draft();
        let valid = match self.schema.validate(&draft) {
            Ok(valid) => valid,
            Err(errors) => {
                for field in &self.fields {
                    match errors.for_field(field.name()) {
                        Some(message) => field.set_error(message),
                        None => field.clear_error(),
                    }
                }
                log::debug!("Signup blocked by validation: {}", errors);
                return Ok(SubmitOutcome::Invalid(errors));
            }
        };
        for field in &self.fields {
            field.clear_error();
        }

        let _submitting = SubmittingGuard::acquire(&self.state)?;
        let payload = valid.to_payload(self.attachment());

        match self.api.create_user(payload).await {
            Ok(created) => {
                log::info!("Signup succeeded with HTTP {}", created.status);
                self.notifier.toast(Toast::success(SUCCESS_MESSAGE));
                self.reset();
                self.refresher.refresh().await;
                Ok(SubmitOutcome::Created(created))
            }
            Err(err) => {
                let message = failure_message(&err);
                self.notifier
                    .toast(Toast::error(format!("Something went wrong, {}", message)));
                log::error!("Signup failed: {:?}", err);
                Ok(SubmitOutcome::Failed(message))
            }
        }
    }

    fn set_attachment(&self, file: Option<FilePart>) {
        match self.attachment.write() {
            Ok(mut guard) => *guard = file,
            Err(poisoned) => *poisoned.into_inner() = file,
        }
    }
}

/// The message shown to the user for a failed request.
///
/// Uses the first structured server message, falling back to
/// [`FALLBACK_MESSAGE`] for transport errors and unrecognised bodies.
pub fn failure_message(err: &ClientError) -> String {
    match err.first_message() {
        Some(message) => message.to_string(),
        None => {
            log::warn!("No structured error message in failure: {}", err);
            FALLBACK_MESSAGE.to_string()
        }
    }
}

/// Holds the form in `Submitting`; returns it to `Idle` when dropped,
/// including when the submit future is cancelled.
struct SubmittingGuard {
    state: Arc<RwLock<SubmitState>>,
}

impl SubmittingGuard {
    fn acquire(state: &Arc<RwLock<SubmitState>>) -> Result<Self, FormError> {
        let mut guard = match state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if *guard == SubmitState::Submitting {
            return Err(FormError::Busy);
        }
        *guard = SubmitState::Submitting;
        log::debug!("Form state: Idle -> Submitting");

        Ok(Self {
            state: state.clone(),
        })
    }
}

impl Drop for SubmittingGuard {
    fn drop(&mut self) {
        match self.state.write() {
            Ok(mut guard) => *guard = SubmitState::Idle,
            Err(poisoned) => *poisoned.into_inner() = SubmitState::Idle,
        }
        log::debug!("Form state: Submitting -> Idle");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signup_lib::error::{ApiError, PayloadError};

    #[test]
    fn test_failure_message_prefers_structured_entry() {
        let err = ClientError::Api(ApiError::http(
            400,
            r#"{"errors":[{"message":"Name taken"},{"message":"second"}]}"#,
        ));
        assert_eq!(failure_message(&err), "Name taken");
    }

    #[test]
    fn test_failure_message_falls_back() {
        let unknown = ClientError::Api(ApiError::http(500, "<html></html>"));
        assert_eq!(failure_message(&unknown), FALLBACK_MESSAGE);

        let payload = ClientError::Payload(PayloadError::InvalidMime("x".to_string()));
        assert_eq!(failure_message(&payload), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_guard_rejects_second_acquire_and_resets_on_drop() {
        let state = Arc::new(RwLock::new(SubmitState::Idle));

        let guard = SubmittingGuard::acquire(&state).unwrap();
        assert!(matches!(SubmittingGuard::acquire(&state), Err(FormError::Busy)));

        drop(guard);
        assert_eq!(*state.read().unwrap(), SubmitState::Idle);
    }
}
