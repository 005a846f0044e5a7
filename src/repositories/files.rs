use super::{opt_datetime, opt_s, opt_s_attr, req_datetime, req_s};
use crate::entities::File;
use crate::infrastructure::store::{DocumentStore, Item};
use anyhow::Result;
use aws_sdk_dynamodb::types::AttributeValue;
use std::sync::Arc;

/// Persistence for [`File`] records, keyed by the generated file id.
#[derive(Clone)]
pub struct FileRepository {
    store: Arc<dyn DocumentStore>,
    table: String,
}

impl FileRepository {
    pub fn new(store: Arc<dyn DocumentStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    pub async fn save(&self, file: &File) -> Result<()> {
        self.store.put_item(&self.table, to_item(file)).await
    }

    /// Full-table scan filtered on username; unordered, empty when nothing
    /// matches.
    pub async fn find_by_username(&self, username: &str) -> Result<Vec<File>> {
        let items = self
            .store
            .scan(&self.table, Some(("username", username)))
            .await?;
        items.iter().map(from_item).collect()
    }
}

fn to_item(file: &File) -> Item {
    Item::from([
        ("fileId".to_string(), AttributeValue::S(file.file_id.clone())),
        (
            "createdAt".to_string(),
            AttributeValue::S(file.created_at.to_rfc3339()),
        ),
        (
            "description".to_string(),
            AttributeValue::S(file.description.clone()),
        ),
        (
            "eventId".to_string(),
            AttributeValue::S(file.event_id.clone()),
        ),
        (
            "username".to_string(),
            AttributeValue::S(file.username.clone()),
        ),
        ("objectKey".to_string(), opt_s_attr(&file.object_key)),
        (
            "dateOfLastDownload".to_string(),
            opt_s_attr(&file.date_of_last_download.map(|d| d.to_rfc3339())),
        ),
    ])
}

fn from_item(item: &Item) -> Result<File> {
    Ok(File {
        file_id: req_s(item, "fileId")?,
        description: req_s(item, "description")?,
        event_id: req_s(item, "eventId")?,
        username: req_s(item, "username")?,
        object_key: opt_s(item, "objectKey"),
        date_of_last_download: opt_datetime(item, "dateOfLastDownload")?,
        created_at: req_datetime(item, "createdAt")?,
    })
}
