pub mod api;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod repositories;
pub mod services;
pub mod utils;

use crate::config::AppConfig;
use crate::infrastructure::store::DocumentStore;
use crate::repositories::{EventRepository, FileRepository, UserRepository};
use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::auth::login,
        api::handlers::users::create_user,
        api::handlers::users::get_all_users,
        api::handlers::users::generate_secure_password,
        api::handlers::events::create_event,
        api::handlers::events::get_events_by_username,
        api::handlers::files::create_file,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::auth::LoginRequest,
            api::handlers::auth::LoginResponse,
            api::handlers::users::CreateUserRequest,
            api::handlers::users::CreateUserResponse,
            api::handlers::users::ListUsersResponse,
            api::handlers::users::GeneratePasswordResponse,
            api::handlers::events::CreateEventRequest,
            api::handlers::events::CreateEventResponse,
            api::handlers::events::EventWithFilesDto,
            api::handlers::events::ListEventsResponse,
            api::handlers::files::CreateFileRequest,
            api::handlers::files::CreateFileResponse,
            api::handlers::health::HealthResponse,
            entities::UserDto,
            entities::UserRole,
            entities::EventDto,
            entities::FileDto,
        )
    ),
    tags(
        (name = "auth", description = "Admin authentication"),
        (name = "users", description = "User management"),
        (name = "events", description = "Event management"),
        (name = "files", description = "File metadata management"),
        (name = "system", description = "Service health")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub users: UserRepository,
    pub events: EventRepository,
    pub files: FileRepository,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: AppConfig) -> Self {
        Self {
            users: UserRepository::new(store.clone(), config.users_table.as_str()),
            events: EventRepository::new(store.clone(), config.events_table.as_str()),
            files: FileRepository::new(store.clone(), config.files_table.as_str()),
            store,
            config,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .nest("/api", api_routes(state.clone()))
        .layer(from_fn(api::middleware::metrics::metrics_middleware))
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(api::handlers::auth::login))
        .route(
            "/users",
            post(api::handlers::users::create_user)
                .get(api::handlers::users::get_all_users)
                .layer(from_fn_with_state(
                    state.clone(),
                    api::middleware::auth::auth_middleware,
                )),
        )
        .route(
            "/users/generatePassword",
            get(api::handlers::users::generate_secure_password).layer(from_fn_with_state(
                state.clone(),
                api::middleware::auth::auth_middleware,
            )),
        )
        .route(
            "/events",
            post(api::handlers::events::create_event).layer(from_fn_with_state(
                state.clone(),
                api::middleware::auth::auth_middleware,
            )),
        )
        .route(
            "/events/:username",
            get(api::handlers::events::get_events_by_username).layer(from_fn_with_state(
                state.clone(),
                api::middleware::auth::auth_middleware,
            )),
        )
        .route(
            "/files",
            post(api::handlers::files::create_file).layer(from_fn_with_state(
                state,
                api::middleware::auth::auth_middleware,
            )),
        )
}
