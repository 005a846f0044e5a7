use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A stored event record. `event_id` is generated once at creation and
/// never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub event_id: String,
    pub date: NaiveDate,
    pub description: String,
    pub title: String,
    pub username: String,
    pub image_placeholder_object_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(
        date: NaiveDate,
        description: String,
        title: String,
        username: String,
        image_placeholder_object_key: Option<String>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            date,
            description,
            title,
            username,
            image_placeholder_object_key,
            created_at: Utc::now(),
        }
    }

    pub fn to_dto(&self) -> EventDto {
        EventDto {
            event_id: self.event_id.clone(),
            created_at: self.created_at,
            date: self.date,
            description: self.description.clone(),
            title: self.title.clone(),
            username: self.username.clone(),
            image_placeholder_object_key: self.image_placeholder_object_key.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub event_id: String,
    pub created_at: DateTime<Utc>,
    pub date: NaiveDate,
    pub description: String,
    pub title: String,
    pub username: String,
    pub image_placeholder_object_key: Option<String>,
}
