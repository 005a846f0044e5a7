use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UserRole {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "ADMIN")]
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "USER" => Some(UserRole::User),
            "ADMIN" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// A stored user record. `password_hash` never leaves the process;
/// responses go through [`UserDto`].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

impl User {
    pub fn new(username: String, email: String, full_name: String, password_hash: String) -> Self {
        Self {
            username,
            email,
            full_name,
            password_hash,
            role: UserRole::User,
            created_at: Utc::now(),
            active: true,
        }
    }

    pub fn to_dto(&self) -> UserDto {
        UserDto {
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            role: self.role,
            created_at: self.created_at,
            active: self.active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "Alice Doe".to_string(),
            "$2b$10$hash".to_string(),
        );
        assert_eq!(user.role, UserRole::User);
        assert!(user.active);
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!(UserRole::parse("ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse(UserRole::User.as_str()), Some(UserRole::User));
        assert_eq!(UserRole::parse("root"), None);
    }

    #[test]
    fn test_dto_serializes_camel_case_without_password() {
        let user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "Alice Doe".to_string(),
            "$2b$10$hash".to_string(),
        );
        let value = serde_json::to_value(user.to_dto()).unwrap();
        assert_eq!(value["fullName"], "Alice Doe");
        assert_eq!(value["role"], "USER");
        assert!(value.get("password").is_none());
        assert!(value.get("passwordHash").is_none());
    }
}
