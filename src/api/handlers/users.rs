use crate::AppState;
use crate::api::error::AppError;
use crate::entities::{User, UserDto};
use crate::utils::password::{generate_password, hash_password, resolve_length};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 128, message = "Username must not be empty"))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 256, message = "Full name must not be empty"))]
    pub full_name: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    pub user_dto: UserDto,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersResponse {
    pub user_dtos: Vec<UserDto>,
}

#[derive(Deserialize)]
pub struct GeneratePasswordQuery {
    pub length: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct GeneratePasswordResponse {
    pub password: String,
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = CreateUserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Username already taken")
    ),
    security(("jwt" = [])),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if state.users.exists_by_username(&payload.username).await? {
        return Err(AppError::Conflict(
            "User with such username already exists".to_string(),
        ));
    }

    let password_hash =
        hash_password(&payload.password).map_err(|e| AppError::Internal(e.to_string()))?;

    let user = User::new(
        payload.username,
        payload.email,
        payload.full_name,
        password_hash,
    );
    state.users.save(&user).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            user_dto: user.to_dto(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = ListUsersResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("jwt" = [])),
    tag = "users"
)]
pub async fn get_all_users(
    State(state): State<AppState>,
) -> Result<Json<ListUsersResponse>, AppError> {
    let users = state.users.find_all().await?;

    tracing::debug!("fetched {} users", users.len());

    Ok(Json(ListUsersResponse {
        user_dtos: users.iter().map(User::to_dto).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/users/generatePassword",
    params(
        ("length" = Option<String>, Query, description = "Desired length (min 6, default 8)")
    ),
    responses(
        (status = 200, description = "Generated password", body = GeneratePasswordResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("jwt" = [])),
    tag = "users"
)]
pub async fn generate_secure_password(
    Query(query): Query<GeneratePasswordQuery>,
) -> Json<GeneratePasswordResponse> {
    let length = resolve_length(query.length.as_deref());

    Json(GeneratePasswordResponse {
        password: generate_password(length),
    })
}
