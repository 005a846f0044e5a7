use crate::AppState;
use crate::api::error::AppError;
use crate::entities::{Event, EventDto, FileDto};
use crate::services::listing::group_files_by_event;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    /// Calendar date of the event (YYYY-MM-DD)
    pub date: NaiveDate,
    pub description: String,
    #[validate(length(min = 1, max = 256, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, max = 128, message = "Username must not be empty"))]
    pub username: String,
    pub image_placeholder_object_key: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventResponse {
    pub event_dto: EventDto,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventWithFilesDto {
    #[serde(flatten)]
    pub event: EventDto,
    pub files_dto: Vec<FileDto>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsResponse {
    pub events_dto: Vec<EventWithFilesDto>,
}

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = CreateEventResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Referenced user does not exist")
    ),
    security(("jwt" = [])),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<CreateEventResponse>), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if !state.users.exists_by_username(&payload.username).await? {
        return Err(AppError::NotFound(
            "User with such username does not exist".to_string(),
        ));
    }

    let event = Event::new(
        payload.date,
        payload.description,
        payload.title,
        payload.username,
        payload.image_placeholder_object_key,
    );
    state.events.save(&event).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateEventResponse {
            event_dto: event.to_dto(),
        }),
    ))
}

/// List a user's events with their files nested under each event.
#[utoipa::path(
    get,
    path = "/api/events/{username}",
    params(
        ("username" = String, Path, description = "Owner of the events")
    ),
    responses(
        (status = 200, description = "Events with nested files", body = ListEventsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User does not exist")
    ),
    security(("jwt" = [])),
    tag = "events"
)]
pub async fn get_events_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ListEventsResponse>, AppError> {
    if !state.users.exists_by_username(&username).await? {
        return Err(AppError::NotFound(
            "User with such username does not exist".to_string(),
        ));
    }

    let events = state.events.find_by_username(&username).await?;
    let files = state.files.find_by_username(&username).await?;

    let events_dto = group_files_by_event(events, files)
        .into_iter()
        .map(|(event, event_files)| EventWithFilesDto {
            event: event.to_dto(),
            files_dto: event_files.iter().map(|f| f.to_dto()).collect(),
        })
        .collect();

    Ok(Json(ListEventsResponse { events_dto }))
}
