use crate::dto::user_dto::RegisterUserPayload;
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::utils::crypto::hash_password;
use crate::utils::time::now_millis;
use sqlx::types::Json;
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserService {
    pool: SqlitePool,
}

impl UserService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, payload: RegisterUserPayload) -> Result<User> {
        let name = format!(
            "{} {}",
            payload.first_name.trim(),
            payload.last_name.trim()
        );
        let password = hash_password(&payload.password)?;
        let now = now_millis();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                id, name, email, password, image, highest_educational_level,
                favorite_programming_language, desired_job_position, desired_sectors,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, NULL, ?5, ?6, ?7, ?8, ?9, ?9)
            RETURNING id, name, email, password, image, highest_educational_level, favorite_programming_language, desired_job_position, desired_sectors, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(payload.email)
        .bind(password)
        .bind(payload.educational_level)
        .bind(payload.favorite_programming_language)
        .bind(payload.desired_job_position)
        .bind(Json(payload.desired_sectors))
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                Error::Conflict("Email is already in use".to_string())
            }
            other => other.into(),
        })?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, image, highest_educational_level, favorite_programming_language, desired_job_position, desired_sectors, created_at, updated_at
             FROM users
             WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("User not found".to_string()));
        }
        Ok(())
    }
}
