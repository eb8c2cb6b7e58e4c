use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A platform user. There is a single hard-coded demo user in this build;
/// the record shape is kept full so a real account system can slot in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
}

/// Free-form viewing preferences owned by the user record.
///
/// Updates replace the whole set, never merge. An absent list and an empty
/// list mean the same thing everywhere these are consumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

/// A user record as submitted for insertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertUser {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub preferences: UserPreferences,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_default_is_empty() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.genres, None);
        assert_eq!(prefs.categories, None);
    }

    #[test]
    fn test_preferences_deserialize_partial() {
        let prefs: UserPreferences =
            serde_json::from_str(r#"{"genres": ["sci-fi", "action"]}"#).unwrap();
        assert_eq!(
            prefs.genres,
            Some(vec!["sci-fi".to_string(), "action".to_string()])
        );
        assert_eq!(prefs.categories, None);
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User {
            id: 1,
            username: "demo_user".to_string(),
            email: "demo@streamvision.com".to_string(),
            preferences: UserPreferences::default(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["username"], "demo_user");
        assert!(json.get("createdAt").is_some());
    }
}
