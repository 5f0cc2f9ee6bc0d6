//! User accounts and their request payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::project::Project;
use crate::types::{DbId, Timestamp};

/// A user as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Name to show in headers and bylines: full name if set, else the username.
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }
}

/// A user together with the projects they own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserWithProjects {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// DTO for creating a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    #[validate(length(max = 100, message = "Full name must be at most 100 characters"))]
    pub full_name: Option<String>,
    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

/// DTO for updating a user. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[validate(email(message = "Email address is not valid"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(length(max = 100, message = "Full name must be at most 100 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Query parameters for the user list (`?skip=&limit=&active_only=`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Defaults to `true` on the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_only: Option<bool>,
}

/// Usernames are restricted to ASCII letters, digits, `_`, `-` and `.`.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(CoreError::Validation(
            "Username may only contain letters, digits, '_', '-' and '.'".into(),
        ));
    }
    Ok(())
}

/// Validate a create payload (lengths, email syntax, username charset).
pub fn validate_create_user(input: &CreateUser) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;
    validate_username(&input.username)
}

/// Validate an update payload; absent fields are not checked.
pub fn validate_update_user(input: &UpdateUser) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;
    if let Some(ref username) = input.username {
        validate_username(username)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(username: &str, email: &str) -> CreateUser {
        CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            full_name: None,
            bio: None,
            avatar_url: None,
        }
    }

    #[test]
    fn valid_user_passes() {
        assert!(validate_create_user(&create("tolkien", "jrr@middle.earth")).is_ok());
    }

    #[test]
    fn short_username_rejected() {
        assert!(validate_create_user(&create("ab", "ab@example.com")).is_err());
    }

    #[test]
    fn username_with_spaces_rejected() {
        assert!(validate_create_user(&create("john smith", "js@example.com")).is_err());
    }

    #[test]
    fn bad_email_rejected() {
        assert!(validate_create_user(&create("someone", "not-an-email")).is_err());
    }

    #[test]
    fn long_bio_rejected() {
        let mut input = create("someone", "s@example.com");
        input.bio = Some("x".repeat(1001));
        assert!(validate_create_user(&input).is_err());
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(validate_update_user(&UpdateUser::default()).is_ok());
    }

    #[test]
    fn update_checks_present_fields() {
        let input = UpdateUser {
            email: Some("nope".into()),
            ..Default::default()
        };
        assert!(validate_update_user(&input).is_err());
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let now = chrono::Utc::now();
        let mut user = User {
            id: 1,
            username: "ursula".into(),
            email: "u@earthsea.org".into(),
            full_name: None,
            bio: None,
            avatar_url: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(user.display_name(), "ursula");
        user.full_name = Some("Ursula K. Le Guin".into());
        assert_eq!(user.display_name(), "Ursula K. Le Guin");
    }
}
