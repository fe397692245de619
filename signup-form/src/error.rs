/// Errors from form operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Inputs are disabled while a submission is in flight.
    #[error("a submission is already in progress")]
    Busy,
}
