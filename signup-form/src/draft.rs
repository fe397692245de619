//! The in-progress signup draft.

use std::fmt;
use std::str::FromStr;

/// One of the five signup fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Name,
    Photo,
    State,
    Country,
    Dob,
}

impl FieldName {
    /// All fields, in the order they are rendered.
    pub const ALL: [FieldName; 5] = [
        FieldName::Name,
        FieldName::Dob,
        FieldName::Photo,
        FieldName::State,
        FieldName::Country,
    ];

    /// All fields, in the order they are written to the payload.
    pub const PAYLOAD_ORDER: [FieldName; 5] = [
        FieldName::Name,
        FieldName::Photo,
        FieldName::State,
        FieldName::Dob,
        FieldName::Country,
    ];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Photo => "photo",
            Self::State => "state",
            Self::Country => "country",
            Self::Dob => "dob",
        }
    }

    /// Prompt shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "What is your name?",
            Self::Photo => "Upload your photo?",
            Self::State => "In which State do you live?",
            Self::Country => "In which country do you live?",
            Self::Dob => "Date of birth?",
        }
    }

    /// Placeholder shown in an empty input.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Name => "Your Name",
            Self::Photo => "Photo",
            Self::State => "Enter state",
            Self::Country => "Country",
            Self::Dob => "DOB",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown field name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for FieldName {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "photo" => Ok(Self::Photo),
            "state" => Ok(Self::State),
            "country" => Ok(Self::Country),
            "dob" => Ok(Self::Dob),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Not-yet-submitted form state. Every field starts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub photo: String,
    pub state: String,
    pub country: String,
    /// Free text; not parsed as a date.
    pub dob: String,
}

impl UserDraft {
    /// Returns the value of a field.
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => &self.name,
            FieldName::Photo => &self.photo,
            FieldName::State => &self.state,
            FieldName::Country => &self.country,
            FieldName::Dob => &self.dob,
        }
    }

    /// Replaces the value of a field.
    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        let slot = match field {
            FieldName::Name => &mut self.name,
            FieldName::Photo => &mut self.photo,
            FieldName::State => &mut self.state,
            FieldName::Country => &mut self.country,
            FieldName::Dob => &mut self.dob,
        };
        *slot = value.into();
    }

    /// Returns `true` if every field is empty.
    pub fn is_empty(&self) -> bool {
        FieldName::ALL.iter().all(|field| self.get(*field).is_empty())
    }
}
