use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::listing_dto::{CreateListingPayload, ListingResponse},
    error::Result,
    middleware::auth::Claims,
    ranking,
    utils::time,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/listings",
    responses(
        (status = 200, description = "Every listing, ranked for display: promoted first, then votes descending")
    )
)]
#[axum::debug_handler]
pub async fn list_listings(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let snapshot = state.listing_service.list().await?;
    let ranked = ranking::rank(snapshot, time::now());
    let items: Vec<ListingResponse> = ranked.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/listings",
    responses(
        (status = 201, description = "Listing created successfully"),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid session token")
    )
)]
#[axum::debug_handler]
pub async fn create_listing(
    State(state): State<AppState>,
    _claims: Claims,
    Json(payload): Json<CreateListingPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let listing = state.listing_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ListingResponse::from(listing))))
}

#[utoipa::path(
    get,
    path = "/api/listings/{id}",
    params(
        ("id" = Uuid, Path, description = "Listing ID")
    ),
    responses(
        (status = 200, description = "Listing found"),
        (status = 404, description = "Listing not found")
    )
)]
#[axum::debug_handler]
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let listing = state.listing_service.get_by_id(id).await?;
    Ok(Json(ListingResponse::from(listing)))
}

#[utoipa::path(
    patch,
    path = "/api/listings/{id}",
    params(
        ("id" = Uuid, Path, description = "Listing ID")
    ),
    responses(
        (status = 200, description = "Vote recorded, updated listing returned"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 404, description = "Listing not found")
    )
)]
#[axum::debug_handler]
pub async fn vote_listing(
    State(state): State<AppState>,
    _claims: Claims,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let listing = state.listing_service.increment_vote(id).await?;
    Ok(Json(ListingResponse::from(listing)))
}
