use crate::dto::listing_dto::CreateListingPayload;
use crate::error::{Error, Result};
use crate::models::listing::Listing;
use crate::utils::time::now_millis;
use sqlx::types::Json;
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Clone)]
pub struct ListingService {
    pool: SqlitePool,
}

impl ListingService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The full snapshot the ranking engine sorts. Ordering happens in the
    /// caller, after this read returns and the connection is released.
    pub async fn list(&self) -> Result<Vec<Listing>> {
        let items = sqlx::query_as::<_, Listing>(
            "SELECT id, image, company, offer, location, link, votes, min_salary, max_salary, tags, sticky_seconds, created_at, updated_at
             FROM listings",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn create(&self, payload: CreateListingPayload) -> Result<Listing> {
        let now = now_millis();
        let listing = sqlx::query_as::<_, Listing>(
            r#"
            INSERT INTO listings (
                id, image, company, offer, location, link, votes,
                min_salary, max_salary, tags, sticky_seconds, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?8, ?9, ?10, ?11, ?11)
            RETURNING id, image, company, offer, location, link, votes, min_salary, max_salary, tags, sticky_seconds, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(payload.image)
        .bind(payload.company)
        .bind(payload.offer)
        .bind(payload.location)
        .bind(payload.link)
        .bind(payload.min_salary)
        .bind(payload.max_salary)
        .bind(Json(payload.tags))
        .bind(payload.sticky_duration.as_secs())
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(listing)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Listing> {
        let listing = sqlx::query_as::<_, Listing>(
            "SELECT id, image, company, offer, location, link, votes, min_salary, max_salary, tags, sticky_seconds, created_at, updated_at
             FROM listings
             WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Listing not found".to_string()))?;

        Ok(listing)
    }

    /// Adds exactly one vote and refreshes `updated_at`, returning the
    /// post-increment record. A single UPDATE statement, so concurrent votes
    /// against the same listing serialize in the storage engine and none is
    /// lost.
    pub async fn increment_vote(&self, id: Uuid) -> Result<Listing> {
        let listing = sqlx::query_as::<_, Listing>(
            r#"
            UPDATE listings
            SET votes = COALESCE(votes, 0) + 1, updated_at = ?2
            WHERE id = ?1
            RETURNING id, image, company, offer, location, link, votes, min_salary, max_salary, tags, sticky_seconds, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(now_millis())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Listing not found".to_string()))?;

        Ok(listing)
    }
}
