use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use event_archive_backend::config::AppConfig;
use event_archive_backend::infrastructure::store::{DocumentStore, Item};
use event_archive_backend::repositories::UserRepository;
use event_archive_backend::utils::password::PASSWORD_CHARSET;
use event_archive_backend::{AppState, create_app};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// In-memory stand-in for DynamoDB: upsert-by-key puts, point gets and
/// filtered scans, matching the table schemas the backend is configured
/// with.
struct InMemoryStore {
    key_attrs: HashMap<String, String>,
    tables: Mutex<HashMap<String, Vec<Item>>>,
}

impl InMemoryStore {
    fn new() -> Self {
        let key_attrs = HashMap::from([
            ("Users".to_string(), "username".to_string()),
            ("Events".to_string(), "eventId".to_string()),
            ("Files".to_string(), "fileId".to_string()),
        ]);
        Self {
            key_attrs,
            tables: Mutex::new(HashMap::new()),
        }
    }

    fn table_len(&self, table: &str) -> usize {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .map_or(0, |items| items.len())
    }
}

fn string_attr(item: &Item, attr: &str) -> Option<String> {
    match item.get(attr) {
        Some(AttributeValue::S(s)) => Some(s.clone()),
        _ => None,
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn get_item(&self, table: &str, key_attr: &str, key: &str) -> Result<Option<Item>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.get(table).and_then(|items| {
            items
                .iter()
                .find(|item| string_attr(item, key_attr).as_deref() == Some(key))
                .cloned()
        }))
    }

    async fn put_item(&self, table: &str, item: Item) -> Result<()> {
        let key_attr = self.key_attrs.get(table).expect("unknown table").clone();
        let key = string_attr(&item, &key_attr).expect("item missing key attribute");

        let mut tables = self.tables.lock().unwrap();
        let items = tables.entry(table.to_string()).or_default();
        match items
            .iter_mut()
            .find(|i| string_attr(i, &key_attr).as_deref() == Some(key.as_str()))
        {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
        Ok(())
    }

    async fn scan(&self, table: &str, filter: Option<(&str, &str)>) -> Result<Vec<Item>> {
        let tables = self.tables.lock().unwrap();
        let items = tables.get(table).cloned().unwrap_or_default();
        Ok(match filter {
            None => items,
            Some((attr, value)) => items
                .into_iter()
                .filter(|item| string_attr(item, attr).as_deref() == Some(value))
                .collect(),
        })
    }

    async fn ping(&self) -> bool {
        true
    }
}

fn setup_app() -> (Router, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let config = AppConfig {
        jwt_secret: "test-secret".to_string(),
        ..AppConfig::default()
    };
    let state = AppState::new(store.clone(), config);
    (create_app(state), store)
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn login(app: &Router) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "admin", "password": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

async fn create_user(app: &Router, token: &str, username: &str) {
    let (status, _) = request(
        app,
        "POST",
        "/api/users",
        Some(token),
        Some(json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "fullName": format!("{username} Example"),
            "password": "hunter22"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn create_event(app: &Router, token: &str, username: &str, title: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/events",
        Some(token),
        Some(json!({
            "date": "2024-05-01",
            "description": "description",
            "title": title,
            "username": username
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["eventDto"]["eventId"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_admin_login_issues_token() {
    let (app, _store) = setup_app();
    let token = login(&app).await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_login_with_wrong_credentials_is_rejected() {
    let (app, _store) = setup_app();
    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "admin", "password": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_protected_routes_require_valid_token() {
    let (app, _store) = setup_app();

    let (status, body) = request(&app, "GET", "/api/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized");

    let (status, _) = request(&app, "GET", "/api/users", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A tampered signature must not pass either
    let tampered = format!("{}x", login(&app).await);
    let (status, _) = request(&app, "GET", "/api/users", Some(&tampered), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_user_returns_dto_without_password() {
    let (app, _store) = setup_app();
    let token = login(&app).await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/users",
        Some(&token),
        Some(json!({
            "username": "alice",
            "email": "alice@example.com",
            "fullName": "Alice Doe",
            "password": "hunter22"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let dto = &body["userDto"];
    assert_eq!(dto["username"], "alice");
    assert_eq!(dto["fullName"], "Alice Doe");
    assert_eq!(dto["role"], "USER");
    assert_eq!(dto["active"], true);
    assert!(dto.get("password").is_none());
    assert!(dto["createdAt"].is_string());
}

#[tokio::test]
async fn test_duplicate_username_conflicts_and_keeps_original() {
    let (app, _store) = setup_app();
    let token = login(&app).await;
    create_user(&app, &token, "alice").await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/users",
        Some(&token),
        Some(json!({
            "username": "alice",
            "email": "impostor@example.com",
            "fullName": "Impostor",
            "password": "hunter22"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);
    assert_eq!(body["message"], "User with such username already exists");

    let (status, body) = request(&app, "GET", "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let users = body["userDtos"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_create_user_rejects_invalid_email() {
    let (app, store) = setup_app();
    let token = login(&app).await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/users",
        Some(&token),
        Some(json!({
            "username": "alice",
            "email": "not-an-email",
            "fullName": "Alice Doe",
            "password": "hunter22"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.table_len("Users"), 0);
}

#[tokio::test]
async fn test_generate_password_length_rules() {
    let (app, _store) = setup_app();
    let token = login(&app).await;

    let (status, body) =
        request(&app, "GET", "/api/users/generatePassword", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["password"].as_str().unwrap().len(), 8);

    let (_, body) = request(
        &app,
        "GET",
        "/api/users/generatePassword?length=3",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["password"].as_str().unwrap().len(), 6);

    let (_, body) = request(
        &app,
        "GET",
        "/api/users/generatePassword?length=abc",
        Some(&token),
        None,
    )
    .await;
    let password = body["password"].as_str().unwrap();
    assert_eq!(password.len(), 8);
    assert!(password.bytes().all(|b| PASSWORD_CHARSET.contains(&b)));
}

#[tokio::test]
async fn test_create_event_for_unknown_user_stores_nothing() {
    let (app, store) = setup_app();
    let token = login(&app).await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/events",
        Some(&token),
        Some(json!({
            "date": "2024-05-01",
            "description": "description",
            "title": "title",
            "username": "ghost"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User with such username does not exist");
    assert_eq!(store.table_len("Events"), 0);
}

#[tokio::test]
async fn test_create_file_requires_user_then_event() {
    let (app, store) = setup_app();
    let token = login(&app).await;
    create_user(&app, &token, "alice").await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/files",
        Some(&token),
        Some(json!({
            "description": "description",
            "eventId": "no-such-event",
            "username": "ghost"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User with such username does not exist");

    let (status, body) = request(
        &app,
        "POST",
        "/api/files",
        Some(&token),
        Some(json!({
            "description": "description",
            "eventId": "no-such-event",
            "username": "alice"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Event with such eventId does not exist");
    assert_eq!(store.table_len("Files"), 0);
}

#[tokio::test]
async fn test_create_file_returns_dto() {
    let (app, _store) = setup_app();
    let token = login(&app).await;
    create_user(&app, &token, "alice").await;
    let event_id = create_event(&app, &token, "alice", "Graduation").await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/files",
        Some(&token),
        Some(json!({
            "description": "Scanned diploma",
            "eventId": event_id,
            "username": "alice",
            "objectKey": "files/diploma.pdf"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let dto = &body["fileDto"];
    assert_eq!(dto["eventId"], event_id);
    assert_eq!(dto["objectKey"], "files/diploma.pdf");
    assert_eq!(dto["dateOfLastDownload"], Value::Null);
    assert!(dto["fileId"].is_string());
}

#[tokio::test]
async fn test_file_may_reference_another_users_event() {
    // The file's username is checked for existence only, never against the
    // event's owner.
    let (app, _store) = setup_app();
    let token = login(&app).await;
    create_user(&app, &token, "alice").await;
    create_user(&app, &token, "bob").await;
    let event_id = create_event(&app, &token, "bob", "Bob's event").await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/files",
        Some(&token),
        Some(json!({
            "description": "description",
            "eventId": event_id,
            "username": "alice"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_listing_nests_files_under_their_events() {
    let (app, _store) = setup_app();
    let token = login(&app).await;
    create_user(&app, &token, "alice").await;
    let e1 = create_event(&app, &token, "alice", "Graduation").await;
    let e2 = create_event(&app, &token, "alice", "Wedding").await;

    for description in ["diploma", "group photo"] {
        let (status, _) = request(
            &app,
            "POST",
            "/api/files",
            Some(&token),
            Some(json!({
                "description": description,
                "eventId": e1,
                "username": "alice"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = request(&app, "GET", "/api/events/alice", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let events = body["eventsDto"].as_array().unwrap();
    assert_eq!(events.len(), 2);

    let by_id = |id: &str| {
        events
            .iter()
            .find(|e| e["eventId"] == id)
            .unwrap_or_else(|| panic!("event {id} missing from listing"))
    };
    assert_eq!(by_id(&e1)["filesDto"].as_array().unwrap().len(), 2);
    assert_eq!(by_id(&e2)["filesDto"].as_array().unwrap().len(), 0);
    assert_eq!(by_id(&e1)["date"], "2024-05-01");
}

#[tokio::test]
async fn test_listing_for_unknown_user_is_404() {
    let (app, _store) = setup_app();
    let token = login(&app).await;

    let (status, body) = request(&app, "GET", "/api/events/ghost", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_existence_check_is_idempotent() {
    let (_, store) = setup_app();
    let users = UserRepository::new(store.clone(), "Users");

    assert!(!users.exists_by_username("alice").await.unwrap());
    assert!(!users.exists_by_username("alice").await.unwrap());

    let user = event_archive_backend::entities::User::new(
        "alice".to_string(),
        "alice@example.com".to_string(),
        "Alice Doe".to_string(),
        "$2b$10$hash".to_string(),
    );
    users.save(&user).await.unwrap();

    assert!(users.exists_by_username("alice").await.unwrap());
    assert!(users.exists_by_username("alice").await.unwrap());
}

#[tokio::test]
async fn test_health_endpoint_is_public() {
    let (app, _store) = setup_app();
    let (status, body) = request(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "connected");
}
