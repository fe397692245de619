//! Form validation.
//!
//! A fluent, pure API for checking field values. Results can be pushed onto
//! anything implementing [`Validatable`] so inputs can show their message.
//!
//! # Example
//!
//! ```
//! use signup_form::validation::Validator;
//!
//! let result = Validator::new()
//!     .field("username", "al")
//!         .required("Username is required")
//!         .min_length(3, "Username must be at least 3 characters")
//!     .field("country", "")
//!     .validate();
//!
//! assert!(result.is_invalid());
//! assert_eq!(
//!     result.error_for("username"),
//!     Some("Username must be at least 3 characters"),
//! );
//! ```

mod result;
mod validatable;
mod validator;

pub use result::{FieldError, ValidationResult};
pub use validatable::Validatable;
pub use validator::{FieldBuilder, Validator};
