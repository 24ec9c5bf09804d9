use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Banner;

/// Persistence operations behind the banner endpoints.
///
/// Every method logs unexpected failures where they happen and hands the
/// error back to the caller; nothing is retried.
#[async_trait]
pub trait BannerRepository: Send + Sync {
    /// All banners whose availability flag is explicitly `true`.
    async fn list_available(&self) -> Result<Vec<Banner>, DatabaseError>;

    async fn get_by_id(&self, banner_id: &str) -> Result<Option<Banner>, DatabaseError>;

    /// Insert and return the record exactly as supplied.
    async fn add(&self, banner: Banner) -> Result<Banner, DatabaseError>;

    /// Overwrite every field of the record with the same id.
    /// Returns `false` when no such record exists.
    async fn update(&self, banner: &Banner) -> Result<bool, DatabaseError>;

    /// Remove every record with this id. Returns `false` when none matched.
    async fn delete(&self, banner_id: &str) -> Result<bool, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

pub struct PgBannerRepository {
    pool: PgPool,
}

impl PgBannerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BannerRepository for PgBannerRepository {
    async fn list_available(&self) -> Result<Vec<Banner>, DatabaseError> {
        sqlx::query_as::<_, Banner>(
            "SELECT banner_id, image, resource, urllink, is_available \
             FROM banner WHERE is_available = TRUE ORDER BY banner_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Error retrieving banners.");
            DatabaseError::from(e)
        })
    }

    async fn get_by_id(&self, banner_id: &str) -> Result<Option<Banner>, DatabaseError> {
        sqlx::query_as::<_, Banner>(
            "SELECT banner_id, image, resource, urllink, is_available \
             FROM banner WHERE banner_id = $1 LIMIT 1",
        )
        .bind(banner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, banner_id, "Error retrieving banner with ID {}.", banner_id);
            DatabaseError::from(e)
        })
    }

    async fn add(&self, banner: Banner) -> Result<Banner, DatabaseError> {
        sqlx::query(
            "INSERT INTO banner (banner_id, image, resource, urllink, is_available) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&banner.id)
        .bind(&banner.image)
        .bind(banner.resource)
        .bind(&banner.link)
        .bind(banner.is_available)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, banner_id = %banner.id, "Error adding banner.");
            DatabaseError::from_insert(e, &banner.id)
        })?;

        Ok(banner)
    }

    async fn update(&self, banner: &Banner) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE banner SET image = $2, resource = $3, urllink = $4, is_available = $5 \
             WHERE banner_id = $1",
        )
        .bind(&banner.id)
        .bind(&banner.image)
        .bind(banner.resource)
        .bind(&banner.link)
        .bind(banner.is_available)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, banner_id = %banner.id, "Error updating banner with ID {}.", banner.id);
            DatabaseError::from(e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, banner_id: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM banner WHERE banner_id = $1")
            .bind(banner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, banner_id, "Error deleting banner with ID {}.", banner_id);
                DatabaseError::from(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
