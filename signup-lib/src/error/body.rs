//! Server error body parsing

use serde::Deserialize;
use serde::Serialize;

/// A single entry of a structured server error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerErrorEntry {
    /// Human-readable error message.
    pub message: String,
    /// The request field the error refers to, if the server names one.
    #[serde(default, alias = "param", alias = "path", skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ServerErrorEntry {
    /// Creates an entry with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }
}

/// The body of a failed response, classified by shape.
///
/// The backend is expected to answer failures with
/// `{"errors": [{"message": "..."}]}`, but nothing enforces that. Anything
/// else lands in [`ErrorBody::Unknown`] with the raw text kept for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorBody {
    /// An `errors` list whose first entry carries a message.
    Structured(Vec<ServerErrorEntry>),
    /// Any other body (HTML error pages, empty bodies, other JSON shapes).
    Unknown {
        /// The raw response text.
        raw: String,
    },
}

#[derive(Deserialize)]
struct Envelope {
    errors: Vec<serde_json::Value>,
}

impl ErrorBody {
    /// Classifies a raw response body.
    ///
    /// Entries after the first that lack a string `message` are skipped.
    pub fn parse(raw: &str) -> Self {
        let unknown = || Self::Unknown {
            raw: raw.to_string(),
        };

        let Ok(envelope) = serde_json::from_str::<Envelope>(raw) else {
            return unknown();
        };

        let first_has_message = envelope
            .errors
            .first()
            .and_then(|entry| entry.get("message"))
            .is_some_and(serde_json::Value::is_string);
        if !first_has_message {
            return unknown();
        }

        let entries = envelope
            .errors
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<ServerErrorEntry>(entry).ok())
            .collect();
        Self::Structured(entries)
    }

    /// Returns the message of the first entry for structured bodies.
    pub fn first_message(&self) -> Option<&str> {
        match self {
            Self::Structured(entries) => entries.first().map(|e| e.message.as_str()),
            Self::Unknown { .. } => None,
        }
    }

    /// Returns all structured entries (empty for unknown bodies).
    pub fn entries(&self) -> &[ServerErrorEntry] {
        match self {
            Self::Structured(entries) => entries,
            Self::Unknown { .. } => &[],
        }
    }

    /// Returns `true` if the body did not match the expected shape.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown { .. })
    }
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structured(entries) => {
                let messages: Vec<&str> = entries.iter().map(|e| e.message.as_str()).collect();
                write!(f, "{}", messages.join("; "))
            }
            Self::Unknown { raw } if raw.is_empty() => write!(f, "<empty body>"),
            Self::Unknown { raw } => write!(f, "unrecognised error body: {}", raw),
        }
    }
}
