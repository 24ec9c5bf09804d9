use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Token settings, mirroring the `Jwt:*` configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Shared HMAC-SHA-256 signing secret.
    pub key: String,
    pub issuer: String,
    /// When unset, tokens must carry the issuer as their audience.
    pub audience: Option<String>,
    pub expire_minutes: i64,
}

impl JwtConfig {
    pub fn new(key: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            issuer: issuer.into(),
            audience: None,
            expire_minutes: 60,
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Audience value tokens are checked against.
    pub fn expected_audience(&self) -> &str {
        self.audience.as_deref().unwrap_or(&self.issuer)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_KEY must be set")]
    MissingJwtKey,

    #[error("JWT_ISSUER must be set")]
    MissingJwtIssuer,

    #[error("JWT_EXPIRE_MINUTES must be positive, got {0}")]
    InvalidExpiry(i64),
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name.
    /// Unparseable numeric or boolean values keep the preset.
    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Jwt overrides
        if let Some(v) = lookup("JWT_KEY") {
            self.jwt.key = v;
        }
        if let Some(v) = lookup("JWT_ISSUER") {
            self.jwt.issuer = v;
        }
        if let Some(v) = lookup("JWT_AUDIENCE") {
            self.jwt.audience = Some(v).filter(|s| !s.trim().is_empty());
        }
        if let Some(v) = lookup("JWT_EXPIRE_MINUTES") {
            self.jwt.expire_minutes = v.parse().unwrap_or(self.jwt.expire_minutes);
        }

        // Database overrides
        if let Some(v) = lookup("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // API overrides
        if let Some(v) = lookup("API_HOST") {
            self.api.host = v;
        }
        if let Some(port) = lookup("API_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.api.port = port;
        }

        // Security overrides
        if let Some(v) = lookup("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        self
    }

    /// Reject configurations the token validator cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.key.is_empty() {
            return Err(ConfigError::MissingJwtKey);
        }
        if self.jwt.issuer.is_empty() {
            return Err(ConfigError::MissingJwtIssuer);
        }
        if self.jwt.expire_minutes <= 0 {
            return Err(ConfigError::InvalidExpiry(self.jwt.expire_minutes));
        }
        Ok(())
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            jwt: JwtConfig {
                key: "development-only-signing-key-change-me-0123456789".to_string(),
                issuer: "banner-api".to_string(),
                audience: None,
                expire_minutes: 60 * 24,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout: 30,
            },
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: Vec::new(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            jwt: JwtConfig {
                key: String::new(),
                issuer: String::new(),
                audience: None,
                expire_minutes: 60,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 10,
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            jwt: JwtConfig {
                key: String::new(),
                issuer: String::new(),
                audience: None,
                expire_minutes: 30,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 5,
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
