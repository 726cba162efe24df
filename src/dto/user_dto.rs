use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::User;
use crate::utils::time::from_millis;
use crate::utils::validation::{
    validate_educational_level, validate_job_position, validate_programming_language,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUserPayload {
    #[validate(length(min = 1, max = 20, message = "First name must be between 1 and 20 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 20, message = "Last name must be between 1 and 20 characters"))]
    pub last_name: String,
    #[validate(email(message = "Must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
    #[validate(custom(function = "validate_educational_level"))]
    pub educational_level: String,
    #[validate(custom(function = "validate_programming_language"))]
    pub favorite_programming_language: String,
    #[validate(custom(function = "validate_job_position"))]
    pub desired_job_position: String,
    #[serde(default)]
    pub desired_sectors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DeleteUserQuery {
    pub id: Option<Uuid>,
}

/// Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub highest_educational_level: Option<String>,
    pub favorite_programming_language: Option<String>,
    pub desired_job_position: Option<String>,
    pub desired_sectors: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            created_at: from_millis(value.created_at),
            updated_at: from_millis(value.updated_at),
            name: value.name,
            email: value.email,
            image: value.image,
            highest_educational_level: value.highest_educational_level,
            favorite_programming_language: value.favorite_programming_language,
            desired_job_position: value.desired_job_position,
            desired_sectors: value.desired_sectors.map(|s| s.0).unwrap_or_default(),
        }
    }
}
