pub mod events;
pub mod files;
pub mod users;

pub use events::EventRepository;
pub use files::FileRepository;
pub use users::UserRepository;

use crate::infrastructure::store::Item;
use anyhow::{Result, anyhow};
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};

// Attribute helpers shared by the per-entity conversions.

pub(crate) fn req_s(item: &Item, attr: &str) -> Result<String> {
    item.get(attr)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| anyhow!("record is missing string attribute '{attr}'"))
}

pub(crate) fn opt_s(item: &Item, attr: &str) -> Option<String> {
    match item.get(attr) {
        Some(AttributeValue::S(s)) => Some(s.clone()),
        _ => None,
    }
}

pub(crate) fn req_bool(item: &Item, attr: &str) -> Result<bool> {
    item.get(attr)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| anyhow!("record is missing boolean attribute '{attr}'"))
}

pub(crate) fn req_datetime(item: &Item, attr: &str) -> Result<DateTime<Utc>> {
    let raw = req_s(item, attr)?;
    let parsed = DateTime::parse_from_rfc3339(&raw)
        .map_err(|e| anyhow!("attribute '{attr}' is not an ISO-8601 timestamp: {e}"))?;
    Ok(parsed.with_timezone(&Utc))
}

pub(crate) fn opt_datetime(item: &Item, attr: &str) -> Result<Option<DateTime<Utc>>> {
    match opt_s(item, attr) {
        None => Ok(None),
        Some(raw) => {
            let parsed = DateTime::parse_from_rfc3339(&raw)
                .map_err(|e| anyhow!("attribute '{attr}' is not an ISO-8601 timestamp: {e}"))?;
            Ok(Some(parsed.with_timezone(&Utc)))
        }
    }
}

pub(crate) fn opt_s_attr(value: &Option<String>) -> AttributeValue {
    match value {
        Some(s) => AttributeValue::S(s.clone()),
        None => AttributeValue::Null(true),
    }
}
