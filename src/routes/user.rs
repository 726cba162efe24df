use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::user_dto::{DeleteUserQuery, RegisterUserPayload, UserResponse},
    error::{Error, Result},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/users",
    responses(
        (status = 201, description = "User registered successfully"),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email is already in use")
    )
)]
#[axum::debug_handler]
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    delete,
    path = "/api/users",
    params(
        ("id" = Option<Uuid>, Query, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Missing user ID"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Query(query): Query<DeleteUserQuery>,
) -> Result<impl IntoResponse> {
    let id = query
        .id
        .ok_or_else(|| Error::BadRequest("User ID required".to_string()))?;
    state.user_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
