use crate::AppState;
use crate::api::error::AppError;
use crate::utils::auth::issue_token;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity embedded in tokens issued through the admin login
const ADMIN_PRINCIPAL_ID: &str = "admin";

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

/// Admin login checks the statically configured credential pair, not the
/// Users table. This is the only authentication path; per-user login does
/// not exist.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.username != state.config.admin_username
        || payload.password != state.config.admin_password
    {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = issue_token(
        ADMIN_PRINCIPAL_ID,
        &payload.username,
        &state.config.jwt_secret,
        state.config.token_ttl_days,
    )
    .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(LoginResponse { token }))
}
