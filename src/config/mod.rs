use std::env;

/// Runtime configuration, built once at startup and shared read-only
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind host (default: "127.0.0.1")
    pub host: String,

    /// Bind port (default: 3000)
    pub port: u16,

    /// AWS region for the DynamoDB client (default: "eu-central-1")
    pub aws_region: String,

    /// DynamoDB table holding user records (default: "Users")
    pub users_table: String,

    /// DynamoDB table holding event records (default: "Events")
    pub events_table: String,

    /// DynamoDB table holding file records (default: "Files")
    pub files_table: String,

    /// Shared secret for signing bearer tokens
    pub jwt_secret: String,

    /// Token lifetime in days (default: 7)
    pub token_ttl_days: i64,

    /// Statically configured admin login
    pub admin_username: String,
    pub admin_password: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            aws_region: "eu-central-1".to_string(),
            users_table: "Users".to_string(),
            events_table: "Events".to_string(),
            files_table: "Files".to_string(),
            jwt_secret: "default_jwt_secret".to_string(),
            token_ttl_days: 7,
            admin_username: "admin".to_string(),
            admin_password: "admin".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            host: env::var("BIND_HOST").unwrap_or(default.host),

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),

            aws_region: env::var("AWS_REGION").unwrap_or(default.aws_region),

            users_table: env::var("USERS_TABLE").unwrap_or(default.users_table),

            events_table: env::var("EVENTS_TABLE").unwrap_or(default.events_table),

            files_table: env::var("FILES_TABLE").unwrap_or(default.files_table),

            jwt_secret: env::var("JWT_SECRET").unwrap_or(default.jwt_secret),

            token_ttl_days: env::var("TOKEN_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.token_ttl_days),

            admin_username: env::var("ADMIN_USERNAME").unwrap_or(default.admin_username),

            admin_password: env::var("ADMIN_PASSWORD").unwrap_or(default.admin_password),
        }
    }

    /// Create config for development (local defaults, weak credentials)
    pub fn development() -> Self {
        Self::default()
    }

    /// Create config for production (secrets must be provided)
    pub fn production() -> Self {
        let default = Self::default();

        Self {
            host: env::var("BIND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),
            aws_region: env::var("AWS_REGION").unwrap_or(default.aws_region),
            users_table: env::var("USERS_TABLE").unwrap_or(default.users_table),
            events_table: env::var("EVENTS_TABLE").unwrap_or(default.events_table),
            files_table: env::var("FILES_TABLE").unwrap_or(default.files_table),
            jwt_secret: env::var("JWT_SECRET").expect("CRITICAL: JWT_SECRET must be set"),
            token_ttl_days: env::var("TOKEN_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.token_ttl_days),
            admin_username: env::var("ADMIN_USERNAME").unwrap_or(default.admin_username),
            admin_password: env::var("ADMIN_PASSWORD")
                .expect("CRITICAL: ADMIN_PASSWORD must be set"),
        }
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
