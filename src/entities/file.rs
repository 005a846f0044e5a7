use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A stored file metadata record. The binary payload lives in an external
/// object store and is referenced only through `object_key`.
/// `date_of_last_download` is persisted for record-shape compatibility but
/// no operation currently sets it.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub file_id: String,
    pub description: String,
    pub event_id: String,
    pub username: String,
    pub object_key: Option<String>,
    pub date_of_last_download: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl File {
    pub fn new(
        description: String,
        event_id: String,
        username: String,
        object_key: Option<String>,
    ) -> Self {
        Self {
            file_id: Uuid::new_v4().to_string(),
            description,
            event_id,
            username,
            object_key,
            date_of_last_download: None,
            created_at: Utc::now(),
        }
    }

    pub fn to_dto(&self) -> FileDto {
        FileDto {
            file_id: self.file_id.clone(),
            created_at: self.created_at,
            description: self.description.clone(),
            event_id: self.event_id.clone(),
            username: self.username.clone(),
            object_key: self.object_key.clone(),
            date_of_last_download: self.date_of_last_download,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileDto {
    pub file_id: String,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub event_id: String,
    pub username: String,
    pub object_key: Option<String>,
    pub date_of_last_download: Option<DateTime<Utc>>,
}
