//! Multipart request payload

use std::path::Path;

use crate::error::PayloadError;

/// A single value in a [`Payload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// A plain text field.
    Text(String),
    /// A binary file upload.
    File(FilePart),
}

impl Part {
    /// Returns the text value, if this is a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::File(_) => None,
        }
    }

    /// Returns the file, if this is a file part.
    pub fn as_file(&self) -> Option<&FilePart> {
        match self {
            Self::Text(_) => None,
            Self::File(file) => Some(file),
        }
    }
}

impl From<String> for Part {
    fn from(value: String) -> Self {
        Part::Text(value)
    }
}

impl From<&str> for Part {
    fn from(value: &str) -> Self {
        Part::Text(value.to_string())
    }
}

impl From<FilePart> for Part {
    fn from(file: FilePart) -> Self {
        Part::File(file)
    }
}

/// In-memory file content destined for a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Raw file content.
    pub bytes: Vec<u8>,
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type, if known.
    pub mime_type: Option<String>,
}

impl FilePart {
    /// Creates a file part without a MIME type.
    pub fn new(bytes: impl Into<Vec<u8>>, file_name: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            file_name: file_name.into(),
            mime_type: None,
        }
    }

    /// Sets the MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Reads a file from disk, guessing the MIME type from its extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, PayloadError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| PayloadError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self {
            bytes,
            mime_type: mime_guess::from_path(path)
                .first()
                .map(|mime| mime.essence_str().to_string()),
            file_name,
        })
    }

    /// Size of the content in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the file is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Ordered collection of named parts sent as a multipart body.
///
/// Setting a name that already exists replaces the part in place, so the
/// original field order is kept.
///
/// # Example
///
/// ```
/// use signup_lib::model::{FilePart, Payload};
///
/// let payload = Payload::new()
///     .text("name", "Alice Wonderland")
///     .file("photo", FilePart::new(vec![0xff, 0xd8], "me.jpg"));
///
/// assert_eq!(payload.get_text("name"), Some("Alice Wonderland"));
/// assert!(payload.get("photo").unwrap().as_file().is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    parts: Vec<(String, Part)>,
}

impl Payload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a text part.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, Part::Text(value.into()));
        self
    }

    /// Adds or replaces a file part.
    pub fn file(mut self, name: impl Into<String>, file: FilePart) -> Self {
        self.insert(name, Part::File(file));
        self
    }

    /// Adds or replaces a part.
    pub fn insert(&mut self, name: impl Into<String>, part: impl Into<Part>) {
        let name = name.into();
        let part = part.into();
        match self.parts.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = part,
            None => self.parts.push((name, part)),
        }
    }

    /// Returns the part with the given name.
    pub fn get(&self, name: &str) -> Option<&Part> {
        self.parts
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, part)| part)
    }

    /// Returns the text value with the given name.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Part::as_text)
    }

    /// Iterates over parts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Part)> {
        self.parts.iter().map(|(name, part)| (name.as_str(), part))
    }

    /// Field names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.parts.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` if there are no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Converts into a reqwest multipart form.
    pub fn into_form(self) -> Result<reqwest::multipart::Form, PayloadError> {
        let mut form = reqwest::multipart::Form::new();

        for (name, part) in self.parts {
            form = match part {
                Part::Text(value) => form.text(name, value),
                Part::File(file) => {
                    let mut upload =
                        reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
                    if let Some(mime) = file.mime_type {
                        upload = upload
                            .mime_str(&mime)
                            .map_err(|_| PayloadError::InvalidMime(mime.clone()))?;
                    }
                    form.part(name, upload)
                }
            };
        }

        Ok(form)
    }
}
