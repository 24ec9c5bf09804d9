#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing_subscriber::EnvFilter;

use banner_api::auth::{generate_jwt, ROLE_ADMIN, ROLE_USER};
use banner_api::config::AppConfig;
use banner_api::database::{Banner, BannerRepository, DatabaseError, InMemoryBannerRepository};

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub config: AppConfig,
}

impl TestServer {
    /// Serve the app in-process on a free port, backed by `repository`.
    pub async fn spawn(repository: Arc<dyn BannerRepository>) -> Result<Self> {
        init_tracing();
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::development();
        config.jwt.key = "integration-test-signing-key-0123456789abcdef".to_string();
        config.jwt.issuer = "banner-api-tests".to_string();

        let app = banner_api::app(repository, &config);
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self { port, base_url, config };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn token(&self, subject: &str, roles: &[&str]) -> String {
        generate_jwt(&self.config.jwt, subject, roles).expect("sign test token")
    }

    pub fn admin_token(&self) -> String {
        self.token("admin-1", &[ROLE_ADMIN])
    }

    pub fn user_token(&self) -> String {
        self.token("user-1", &[ROLE_USER])
    }
}

/// Route server logs through the test harness; `RUST_LOG=banner_api=debug` to see them.
fn init_tracing() {
    // Later calls fail once a global subscriber is set.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("banner_api=warn")),
        )
        .with_test_writer()
        .try_init();
}

pub async fn spawn_with(banners: Vec<Banner>) -> Result<(TestServer, Arc<InMemoryBannerRepository>)> {
    let repository = Arc::new(InMemoryBannerRepository::with_banners(banners));
    let server = TestServer::spawn(repository.clone()).await?;
    Ok((server, repository))
}

pub fn banner(id: &str, is_available: Option<bool>) -> Banner {
    Banner {
        id: id.to_string(),
        image: Some(format!("{id}.png")),
        resource: Some(1),
        link: Some(format!("http://example.com/{id}")),
        is_available,
    }
}

/// Store whose every operation fails, for exercising the 500 path.
pub struct UnavailableRepository;

#[async_trait]
impl BannerRepository for UnavailableRepository {
    async fn list_available(&self) -> Result<Vec<Banner>, DatabaseError> {
        Err(DatabaseError::Unavailable("connection refused".into()))
    }

    async fn get_by_id(&self, _banner_id: &str) -> Result<Option<Banner>, DatabaseError> {
        Err(DatabaseError::Unavailable("connection refused".into()))
    }

    async fn add(&self, _banner: Banner) -> Result<Banner, DatabaseError> {
        Err(DatabaseError::Unavailable("connection refused".into()))
    }

    async fn update(&self, _banner: &Banner) -> Result<bool, DatabaseError> {
        Err(DatabaseError::Unavailable("connection refused".into()))
    }

    async fn delete(&self, _banner_id: &str) -> Result<bool, DatabaseError> {
        Err(DatabaseError::Unavailable("connection refused".into()))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Err(DatabaseError::Unavailable("connection refused".into()))
    }
}
