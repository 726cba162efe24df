use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::auth_dto::{LoginPayload, LoginResponse},
    error::{Error, Result},
    utils::{crypto, token},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/login",
    responses(
        (status = 200, description = "Session token issued"),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Invalid email or password")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let user = state
        .user_service
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| Error::Unauthorized("Invalid email or password".to_string()))?;

    if !crypto::verify_password(&payload.password, &user.password)? {
        return Err(Error::Unauthorized("Invalid email or password".to_string()));
    }

    let token = token::issue_session_token(user.id)?;
    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}
