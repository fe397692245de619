use std::sync::{Arc, RwLock};

use crate::draft::FieldName;
use crate::validation::Validatable;

#[derive(Debug, Default)]
struct FieldInner {
    value: String,
    error: Option<String>,
}

/// Shared handle to one input's value and validation message.
///
/// Cheap to clone; clones see the same value, so a renderer and the form
/// can both hold one.
///
/// # Example
///
/// ```
/// use signup_form::draft::FieldName;
/// use signup_form::field::Field;
///
/// let name = Field::new(FieldName::Name);
/// let view = name.clone();
///
/// name.set("Alice Wonderland");
/// assert_eq!(view.value(), "Alice Wonderland");
/// ```
#[derive(Debug, Clone)]
pub struct Field {
    name: FieldName,
    inner: Arc<RwLock<FieldInner>>,
}

impl Field {
    /// Create an empty field.
    pub fn new(name: FieldName) -> Self {
        Self {
            name,
            inner: Arc::new(RwLock::new(FieldInner::default())),
        }
    }

    /// Which field this is.
    pub fn name(&self) -> FieldName {
        self.name
    }

    /// Get a clone of the current value.
    pub fn value(&self) -> String {
        self.read(|inner| inner.value.clone())
    }

    /// Replace the value and clear any validation message.
    pub fn set(&self, value: impl Into<String>) {
        let value = value.into();
        self.write(|inner| {
            inner.value = value;
            inner.error = None;
        });
    }

    /// Empty the value and clear any validation message.
    pub fn clear(&self) {
        self.write(|inner| *inner = FieldInner::default());
    }

    fn read<R>(&self, f: impl FnOnce(&FieldInner) -> R) -> R {
        match self.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    fn write(&self, f: impl FnOnce(&mut FieldInner)) {
        match self.inner.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl Validatable for Field {
    fn field_name(&self) -> &str {
        self.name.as_str()
    }

    fn set_error(&self, msg: impl Into<String>) {
        let msg = msg.into();
        self.write(|inner| inner.error = Some(msg));
    }

    fn clear_error(&self) {
        self.write(|inner| inner.error = None);
    }

    fn error(&self) -> Option<String> {
        self.read(|inner| inner.error.clone())
    }
}
