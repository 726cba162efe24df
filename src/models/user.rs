use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub image: Option<String>,
    pub highest_educational_level: Option<String>,
    pub favorite_programming_language: Option<String>,
    pub desired_job_position: Option<String>,
    pub desired_sectors: Option<Json<Vec<String>>>,
    pub created_at: i64,
    pub updated_at: i64,
}
