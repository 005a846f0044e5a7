use crate::AppState;
use crate::api::error::AppError;
use crate::entities::{File, FileDto};
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileRequest {
    pub description: String,
    #[validate(length(min = 1, message = "Event id must not be empty"))]
    pub event_id: String,
    #[validate(length(min = 1, max = 128, message = "Username must not be empty"))]
    pub username: String,
    pub object_key: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileResponse {
    pub file_dto: FileDto,
}

/// Create a file metadata record. The referenced user and event are checked
/// in that order; the file's username is deliberately not compared with the
/// event's own username.
#[utoipa::path(
    post,
    path = "/api/files",
    request_body = CreateFileRequest,
    responses(
        (status = 201, description = "File created", body = CreateFileResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Referenced user or event does not exist")
    ),
    security(("jwt" = [])),
    tag = "files"
)]
pub async fn create_file(
    State(state): State<AppState>,
    Json(payload): Json<CreateFileRequest>,
) -> Result<(StatusCode, Json<CreateFileResponse>), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if !state.users.exists_by_username(&payload.username).await? {
        return Err(AppError::NotFound(
            "User with such username does not exist".to_string(),
        ));
    }

    if !state.events.exists_by_id(&payload.event_id).await? {
        return Err(AppError::NotFound(
            "Event with such eventId does not exist".to_string(),
        ));
    }

    let file = File::new(
        payload.description,
        payload.event_id,
        payload.username,
        payload.object_key,
    );
    state.files.save(&file).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateFileResponse {
            file_dto: file.to_dto(),
        }),
    ))
}
