//! Validatable trait for inputs that can display validation errors.

/// Trait for inputs that can be validated.
pub trait Validatable {
    /// Name used to match errors from a [`ValidationResult`](super::ValidationResult).
    fn field_name(&self) -> &str;

    /// Set a validation error on this input.
    fn set_error(&self, msg: impl Into<String>);

    /// Clear the validation error.
    fn clear_error(&self);

    /// Get the current validation error message (if any).
    fn error(&self) -> Option<String>;

    /// Check if the input has a validation error.
    fn has_error(&self) -> bool {
        self.error().is_some()
    }
}
