use super::{req_bool, req_datetime, req_s};
use crate::entities::{User, UserRole};
use crate::infrastructure::store::{DocumentStore, Item};
use anyhow::{Result, anyhow};
use aws_sdk_dynamodb::types::AttributeValue;
use std::sync::Arc;

const KEY_ATTR: &str = "username";

/// Persistence for [`User`] records, keyed by username.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
    table: String,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    /// Write the full record unconditionally (last write wins)
    pub async fn save(&self, user: &User) -> Result<()> {
        self.store.put_item(&self.table, to_item(user)).await
    }

    pub async fn exists_by_username(&self, username: &str) -> Result<bool> {
        let item = self.store.get_item(&self.table, KEY_ATTR, username).await?;
        Ok(item.is_some())
    }

    pub async fn find_all(&self) -> Result<Vec<User>> {
        let items = self.store.scan(&self.table, None).await?;
        items.iter().map(from_item).collect()
    }
}

fn to_item(user: &User) -> Item {
    Item::from([
        ("username".to_string(), AttributeValue::S(user.username.clone())),
        (
            "createdAt".to_string(),
            AttributeValue::S(user.created_at.to_rfc3339()),
        ),
        ("email".to_string(), AttributeValue::S(user.email.clone())),
        (
            "fullName".to_string(),
            AttributeValue::S(user.full_name.clone()),
        ),
        (
            "password".to_string(),
            AttributeValue::S(user.password_hash.clone()),
        ),
        (
            "role".to_string(),
            AttributeValue::S(user.role.as_str().to_string()),
        ),
        ("active".to_string(), AttributeValue::Bool(user.active)),
    ])
}

fn from_item(item: &Item) -> Result<User> {
    let role_raw = req_s(item, "role")?;
    let role = UserRole::parse(&role_raw)
        .ok_or_else(|| anyhow!("unknown user role '{role_raw}'"))?;

    Ok(User {
        username: req_s(item, "username")?,
        email: req_s(item, "email")?,
        full_name: req_s(item, "fullName")?,
        password_hash: req_s(item, "password")?,
        role,
        created_at: req_datetime(item, "createdAt")?,
        active: req_bool(item, "active")?,
    })
}
