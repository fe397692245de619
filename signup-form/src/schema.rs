//! Validation schema for the signup draft.

use chrono::NaiveDate;
use signup_lib::model::{FilePart, Payload};

use crate::draft::{FieldName, UserDraft};
use crate::validation::{FieldError, ValidationResult, Validator};

/// Shortest accepted name, in characters.
pub const NAME_MIN_LEN: usize = 5;

/// Longest accepted name, in characters.
pub const NAME_MAX_LEN: usize = 30;

/// Why a name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("Name must be 5 or more characters long")]
    TooShort,
    #[error("Name must be less than 30 characters")]
    TooLong,
}

impl NameError {
    /// Checks a name against the length bounds.
    pub fn check(name: &str) -> Result<(), NameError> {
        let len = name.chars().count();
        if len < NAME_MIN_LEN {
            Err(NameError::TooShort)
        } else if len > NAME_MAX_LEN {
            Err(NameError::TooLong)
        } else {
            Ok(())
        }
    }
}

/// How strictly the non-name fields are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaMode {
    /// Only `name` is checked; everything else is accepted as-is.
    #[default]
    Lenient,
    /// Additionally require `state`, `country` and a `YYYY-MM-DD` `dob`.
    Strict,
}

/// Per-field messages produced by a failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// All errors, in render order.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// The message for one field, if it failed.
    pub fn for_field(&self, field: FieldName) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field_name == field.as_str())
            .map(|e| e.message.as_str())
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

/// A draft that passed the schema.
///
/// Only [`SignupSchema::validate`] creates one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft(UserDraft);

impl ValidDraft {
    pub fn as_draft(&self) -> &UserDraft {
        &self.0
    }

    pub fn into_inner(self) -> UserDraft {
        self.0
    }

    /// Builds the request payload: `name, photo, state, dob, country`.
    ///
    /// With an attachment, `photo` is sent as a file part instead of text.
    pub fn to_payload(&self, photo: Option<FilePart>) -> Payload {
        let mut payload = Payload::new();
        for field in FieldName::PAYLOAD_ORDER {
            payload.insert(field.as_str(), self.0.get(field));
        }
        if let Some(file) = photo {
            payload.insert(FieldName::Photo.as_str(), file);
        }
        payload
    }
}

/// The signup validation schema.
///
/// # Example
///
/// ```
/// use signup_form::draft::{FieldName, UserDraft};
/// use signup_form::schema::SignupSchema;
///
/// let mut draft = UserDraft::default();
/// draft.name = "Al".to_string();
///
/// let errors = SignupSchema::new().validate(&draft).unwrap_err();
/// assert_eq!(
///     errors.for_field(FieldName::Name),
///     Some("Name must be 5 or more characters long"),
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignupSchema {
    mode: SchemaMode,
}

impl SignupSchema {
    /// The lenient schema: only `name` is checked.
    pub fn new() -> Self {
        Self::default()
    }

    /// The strict schema.
    pub fn strict() -> Self {
        Self {
            mode: SchemaMode::Strict,
        }
    }

    pub fn mode(&self) -> SchemaMode {
        self.mode
    }

    /// Runs every rule and reports per-field results.
    pub fn check(&self, draft: &UserDraft) -> ValidationResult {
        let strict = self.mode == SchemaMode::Strict;

        let name = Validator::new()
            .field(FieldName::Name.as_str(), draft.name.as_str())
            .rule(|v| NameError::check(v) != Err(NameError::TooShort), NameError::TooShort.to_string())
            .rule(|v| NameError::check(v) != Err(NameError::TooLong), NameError::TooLong.to_string());

        let mut dob = name.field(FieldName::Dob.as_str(), draft.dob.as_str());
        if strict {
            dob = dob
                .required("Date of birth is required")
                .rule(
                    |v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").is_ok(),
                    "Date of birth must be YYYY-MM-DD",
                );
        }

        let photo = dob.field(FieldName::Photo.as_str(), draft.photo.as_str());

        let mut state = photo.field(FieldName::State.as_str(), draft.state.as_str());
        if strict {
            state = state.required("State is required");
        }

        let mut country = state.field(FieldName::Country.as_str(), draft.country.as_str());
        if strict {
            country = country.required("Country is required");
        }

        country.validate()
    }

    /// Validates a draft, producing a [`ValidDraft`] or the per-field errors.
    pub fn validate(&self, draft: &UserDraft) -> Result<ValidDraft, ValidationErrors> {
        match self.check(draft) {
            ValidationResult::Valid => Ok(ValidDraft(draft.clone())),
            ValidationResult::Invalid(errors) => Err(ValidationErrors(errors)),
        }
    }
}
