use super::{opt_s, opt_s_attr, req_datetime, req_s};
use crate::entities::Event;
use crate::infrastructure::store::{DocumentStore, Item};
use anyhow::{Result, anyhow};
use aws_sdk_dynamodb::types::AttributeValue;
use std::sync::Arc;

const KEY_ATTR: &str = "eventId";

/// Persistence for [`Event`] records, keyed by the generated event id.
#[derive(Clone)]
pub struct EventRepository {
    store: Arc<dyn DocumentStore>,
    table: String,
}

impl EventRepository {
    pub fn new(store: Arc<dyn DocumentStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    pub async fn save(&self, event: &Event) -> Result<()> {
        self.store.put_item(&self.table, to_item(event)).await
    }

    pub async fn exists_by_id(&self, event_id: &str) -> Result<bool> {
        let item = self.store.get_item(&self.table, KEY_ATTR, event_id).await?;
        Ok(item.is_some())
    }

    /// Full-table scan filtered on username; unordered, empty when nothing
    /// matches.
    pub async fn find_by_username(&self, username: &str) -> Result<Vec<Event>> {
        let items = self
            .store
            .scan(&self.table, Some(("username", username)))
            .await?;
        items.iter().map(from_item).collect()
    }
}

fn to_item(event: &Event) -> Item {
    Item::from([
        (
            "eventId".to_string(),
            AttributeValue::S(event.event_id.clone()),
        ),
        (
            "createdAt".to_string(),
            AttributeValue::S(event.created_at.to_rfc3339()),
        ),
        (
            "date".to_string(),
            AttributeValue::S(event.date.to_string()),
        ),
        (
            "description".to_string(),
            AttributeValue::S(event.description.clone()),
        ),
        ("title".to_string(), AttributeValue::S(event.title.clone())),
        (
            "username".to_string(),
            AttributeValue::S(event.username.clone()),
        ),
        (
            "imagePlaceholderObjectKey".to_string(),
            opt_s_attr(&event.image_placeholder_object_key),
        ),
    ])
}

fn from_item(item: &Item) -> Result<Event> {
    let date_raw = req_s(item, "date")?;
    let date = date_raw
        .parse()
        .map_err(|e| anyhow!("attribute 'date' is not a calendar date: {e}"))?;

    Ok(Event {
        event_id: req_s(item, "eventId")?,
        date,
        description: req_s(item, "description")?,
        title: req_s(item, "title")?,
        username: req_s(item, "username")?,
        image_placeholder_object_key: opt_s(item, "imagePlaceholderObjectKey"),
        created_at: req_datetime(item, "createdAt")?,
    })
}
