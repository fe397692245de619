//! Validator builder for fluent validation API.

use super::result::{FieldError, ValidationResult};

type Rule = Box<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

struct FieldEntry {
    name: String,
    value: String,
    rules: Vec<Rule>,
}

impl FieldEntry {
    /// Runs rules in order and returns the first failure.
    fn check(&self) -> Option<String> {
        self.rules
            .iter()
            .find_map(|rule| rule(&self.value).err())
    }
}

/// Builder for validating multiple form fields.
///
/// Only the first failing rule of each field is reported. Lengths are
/// counted in characters, not bytes.
pub struct Validator {
    fields: Vec<FieldEntry>,
}

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field to validate.
    pub fn field(self, name: impl Into<String>, value: impl Into<String>) -> FieldBuilder {
        FieldBuilder {
            validator: self,
            entry: FieldEntry {
                name: name.into(),
                value: value.into(),
                rules: Vec::new(),
            },
        }
    }

    /// Run all validations.
    pub fn validate(self) -> ValidationResult {
        let errors: Vec<FieldError> = self
            .fields
            .iter()
            .filter_map(|field| {
                field
                    .check()
                    .map(|message| FieldError::new(field.name.clone(), message))
            })
            .collect();

        if errors.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(errors)
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for adding validation rules to a single field.
pub struct FieldBuilder {
    validator: Validator,
    entry: FieldEntry,
}

impl FieldBuilder {
    /// Add a custom rule; `f` returns `true` when the value is acceptable.
    pub fn rule<F>(mut self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let msg = msg.into();
        self.entry
            .rules
            .push(Box::new(move |v| if f(v) { Ok(()) } else { Err(msg.clone()) }));
        self
    }

    /// Reject empty or whitespace-only values.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule(|v| !v.trim().is_empty(), msg)
    }

    /// Reject values shorter than `min` characters.
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.chars().count() >= min, msg)
    }

    /// Reject values longer than `max` characters.
    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.chars().count() <= max, msg)
    }

    /// Continue to the next field.
    pub fn field(self, name: impl Into<String>, value: impl Into<String>) -> FieldBuilder {
        self.finalize().field(name, value)
    }

    /// Finalize and run all validations.
    pub fn validate(self) -> ValidationResult {
        self.finalize().validate()
    }

    /// Finalize this field and return the validator.
    pub fn finalize(self) -> Validator {
        let mut validator = self.validator;
        validator.fields.push(self.entry);
        validator
    }
}
