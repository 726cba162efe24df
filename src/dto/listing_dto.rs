use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::listing::{Listing, StickyDuration};
use crate::utils::time::from_millis;
use crate::utils::validation::validate_secure_url;

/// Served in place of a missing listing image.
pub const DEFAULT_LISTING_IMAGE: &str = "https://placehold.co/128x128";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_salary_bounds", skip_on_field_errors = false))]
pub struct CreateListingPayload {
    #[validate(length(min = 2, max = 50, message = "Company name must be between 2 and 50 characters"))]
    pub company: String,
    #[validate(length(min = 2, max = 50, message = "Offer must be between 2 and 50 characters"))]
    pub offer: String,
    #[validate(length(min = 2, max = 50, message = "Location must be between 2 and 50 characters"))]
    pub location: String,
    #[validate(custom(function = "validate_secure_url"))]
    pub link: String,
    #[serde(default)]
    #[validate(length(max = 3, message = "At most 3 tags are allowed"))]
    pub tags: Vec<String>,
    #[validate(range(min = 1, message = "Minimum salary must be a positive integer"))]
    pub min_salary: Option<i64>,
    #[validate(range(min = 1, message = "Maximum salary must be a positive integer"))]
    pub max_salary: Option<i64>,
    #[serde(default)]
    pub sticky_duration: StickyDuration,
    #[validate(custom(function = "validate_secure_url"))]
    pub image: Option<String>,
}

fn validate_salary_bounds(payload: &CreateListingPayload) -> Result<(), ValidationError> {
    match (payload.min_salary, payload.max_salary) {
        (None, None) => Ok(()),
        (Some(min), Some(max)) if min < max => Ok(()),
        (Some(_), Some(_)) => {
            let mut err = ValidationError::new("salary_order");
            err.message = Some("Minimum salary must be lower than maximum salary".into());
            Err(err)
        }
        _ => {
            let mut err = ValidationError::new("salary_pair");
            err.message =
                Some("Both minimum salary and maximum salary must be provided if one is set".into());
            Err(err)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingResponse {
    pub id: Uuid,
    pub image: String,
    pub company: String,
    pub offer: String,
    pub location: String,
    pub link: String,
    pub votes: i64,
    pub min_salary: Option<i64>,
    pub max_salary: Option<i64>,
    pub tags: Vec<String>,
    pub sticky_seconds: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Listing> for ListingResponse {
    fn from(value: Listing) -> Self {
        Self {
            id: value.id,
            votes: value.vote_count(),
            sticky_seconds: value.sticky_secs(),
            created_at: from_millis(value.created_at),
            updated_at: from_millis(value.updated_at),
            image: value
                .image
                .unwrap_or_else(|| DEFAULT_LISTING_IMAGE.to_string()),
            company: value.company,
            offer: value.offer,
            location: value.location,
            link: value.link,
            min_salary: value.min_salary,
            max_salary: value.max_salary,
            tags: value.tags.map(|tags| tags.0).unwrap_or_default(),
        }
    }
}
