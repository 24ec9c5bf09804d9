use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::TokenValidator;
use crate::config::{AppConfig, JwtConfig, SecurityConfig};
use crate::database::BannerRepository;
use crate::handlers;
use crate::middleware::auth_gate;

/// Shared handles every request needs.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn BannerRepository>,
    pub validator: Arc<TokenValidator>,
}

impl AppState {
    pub fn new(repository: Arc<dyn BannerRepository>, jwt: &JwtConfig) -> Self {
        Self {
            repository,
            validator: Arc::new(TokenValidator::from_config(jwt)),
        }
    }
}

/// Full router: banner endpoints, service info and health, behind the auth gate.
pub fn app(repository: Arc<dyn BannerRepository>, config: &AppConfig) -> Router {
    let state = AppState::new(repository, &config.jwt);
    let router = routes(state.clone()).layer(from_fn_with_state(state.validator, auth_gate));

    let router = match cors_layer(&config.security) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}

fn routes(state: AppState) -> Router {
    use handlers::banner;

    Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Banner collection and records; access is decided per operation
        .route(
            "/banner",
            get(banner::list).post(banner::create).put(banner::update),
        )
        .route("/banner/:banner_id", get(banner::show).delete(banner::delete))
        .with_state(state)
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
