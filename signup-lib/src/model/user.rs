//! User record returned by the backend

use serde::Deserialize;
use serde::Serialize;

/// A user record as returned by a successful create.
///
/// The backend response is not validated beyond this shape; `interests` is
/// part of the record but is never sent by the signup form.
///
/// # Example
///
/// ```
/// use signup_lib::model::User;
///
/// let user: User = serde_json::from_str(
///     r#"{"id":"u1","name":"Alice Wonderland","country":"US","dob":"2000-01-01"}"#,
/// ).unwrap();
/// assert_eq!(user.photo, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier.
    #[serde(alias = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Photo reference, if one was stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// State or region, if the server echoes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Country.
    pub country: String,
    /// Interests, if any were recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    /// Date of birth as free text.
    pub dob: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_mongo_style_id() {
        let json = r#"{"_id":"65a1","name":"Bob Builder","country":"UK","dob":"1990","interests":[]}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "65a1");
        assert_eq!(user.interests, Some(Vec::new()));
    }

    #[test]
    fn test_serialize_skips_absent_optionals() {
        let user = User {
            id: "u1".to_string(),
            name: "Alice Wonderland".to_string(),
            photo: None,
            state: None,
            country: "US".to_string(),
            interests: None,
            dob: "2000-01-01".to_string(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("photo"));
        assert!(!json.contains("interests"));
    }
}
