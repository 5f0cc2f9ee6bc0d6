//! Projects: user-owned containers of articles and images.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Maximum length of a project name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a project description.
pub const MAX_DESCRIPTION_LEN: usize = 5_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<DbId>,
}

/// DTO for updating a project. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Query parameters for the project list (`?skip=&limit=&user_id=`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Only projects owned by this user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<DbId>,
}

/// Validate a project name (non-empty, bounded length).
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Project name must not be empty".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Project name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "Project description must be at most {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_create_project(input: &CreateProject) -> Result<(), CoreError> {
    validate_name(&input.name)?;
    if let Some(ref description) = input.description {
        validate_description(description)?;
    }
    Ok(())
}

pub fn validate_update_project(input: &UpdateProject) -> Result<(), CoreError> {
    if let Some(ref name) = input.name {
        validate_name(name)?;
    }
    if let Some(ref description) = input.description {
        validate_description(description)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_valid() {
        assert!(validate_name("The Shattered Isles").is_ok());
    }

    #[test]
    fn name_blank_rejected() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn name_too_long_rejected() {
        assert!(validate_name(&"n".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn update_without_fields_is_valid() {
        assert!(validate_update_project(&UpdateProject::default()).is_ok());
    }

    #[test]
    fn list_params_skip_absent_fields() {
        let params = ProjectListParams {
            user_id: Some(7),
            ..Default::default()
        };
        let json = serde_json::to_value(params).unwrap();
        assert_eq!(json, serde_json::json!({"user_id": 7}));
    }
}
