use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::Banner;
use crate::database::repository::BannerRepository;

/// Process-local banner store keyed by id. Backs `--store memory` and the test suite.
#[derive(Default)]
pub struct InMemoryBannerRepository {
    banners: RwLock<BTreeMap<String, Banner>>,
}

impl InMemoryBannerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_banners(banners: impl IntoIterator<Item = Banner>) -> Self {
        let banners = banners
            .into_iter()
            .map(|banner| (banner.id.clone(), banner))
            .collect();
        Self {
            banners: RwLock::new(banners),
        }
    }

    /// Copy of every stored record, ordered by id.
    pub async fn snapshot(&self) -> Vec<Banner> {
        self.banners.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl BannerRepository for InMemoryBannerRepository {
    async fn list_available(&self) -> Result<Vec<Banner>, DatabaseError> {
        let banners = self.banners.read().await;
        Ok(banners.values().filter(|b| b.is_listed()).cloned().collect())
    }

    async fn get_by_id(&self, banner_id: &str) -> Result<Option<Banner>, DatabaseError> {
        Ok(self.banners.read().await.get(banner_id).cloned())
    }

    async fn add(&self, banner: Banner) -> Result<Banner, DatabaseError> {
        let mut banners = self.banners.write().await;
        if banners.contains_key(&banner.id) {
            return Err(DatabaseError::DuplicateKey(banner.id));
        }
        banners.insert(banner.id.clone(), banner.clone());
        Ok(banner)
    }

    async fn update(&self, banner: &Banner) -> Result<bool, DatabaseError> {
        let mut banners = self.banners.write().await;
        match banners.get_mut(&banner.id) {
            Some(existing) => {
                *existing = banner.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, banner_id: &str) -> Result<bool, DatabaseError> {
        Ok(self.banners.write().await.remove(banner_id).is_some())
    }
}
