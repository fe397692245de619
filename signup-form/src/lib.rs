//! Headless signup form.
//!
//! Holds the draft, validates it against the signup schema, turns it into a
//! multipart payload and drives one create-user call per submit, reporting
//! the outcome through toasts.
//!
//! # Example
//!
//! ```ignore
//! use signup_form::prelude::*;
//!
//! let form = SignupForm::new(client.user_create(), toasts.clone(), client.clone());
//! form.on_field_change(FieldName::Name, "Alice Wonderland")?;
//!
//! match form.on_submit().await? {
//!     SubmitOutcome::Created(_) => {}
//!     SubmitOutcome::Invalid(errors) => {}
//!     SubmitOutcome::Failed(message) => {}
//! }
//! ```

pub mod api;
pub mod draft;
pub mod error;
pub mod field;
pub mod form;
pub mod refresh;
pub mod schema;
pub mod toast;
pub mod validation;

pub mod prelude {
    pub use crate::api::UserApi;
    pub use crate::draft::{FieldName, UserDraft};
    pub use crate::error::FormError;
    pub use crate::field::Field;
    pub use crate::form::{SignupForm, SubmitOutcome, SubmitState};
    pub use crate::refresh::{NoRefresh, Refresh};
    pub use crate::schema::{SignupSchema, ValidDraft};
    pub use crate::toast::{Notifier, Toast, ToastLevel, ToastQueue};
    pub use crate::validation::{FieldError, ValidationResult, Validator};
}
