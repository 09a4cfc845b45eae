use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use std::sync::Arc;
use tracing::info;

pub struct RealStoreService {
    store_repo: Arc<dyn StoreRepo>,
    item_repo: Arc<dyn ItemRepo>,
    tag_repo: Arc<dyn TagRepo>,
}

impl RealStoreService {
    pub fn new(
        store_repo: Arc<dyn StoreRepo>,
        item_repo: Arc<dyn ItemRepo>,
        tag_repo: Arc<dyn TagRepo>,
    ) -> Self {
        Self {
            store_repo,
            item_repo,
            tag_repo,
        }
    }

    async fn expand(&self, store: PlainStore) -> Result<Store, CatalogError> {
        let items = self.item_repo.list_by_store(store.id).await?;
        let tags = self
            .tag_repo
            .list_by_store(store.id)
            .await?
            .iter()
            .map(TagRecord::plain)
            .collect();
        Ok(Store {
            id: store.id,
            name: store.name,
            items,
            tags,
        })
    }
}

#[async_trait::async_trait]
impl StoreService for RealStoreService {
    async fn list_stores(&self) -> Result<Vec<Store>, CatalogError> {
        let mut stores = Vec::new();
        for store in self.store_repo.list().await? {
            stores.push(self.expand(store).await?);
        }
        Ok(stores)
    }

    async fn create_store(&self, name: &str) -> Result<Store, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::Validation("name must not be blank".to_string()));
        }
        let store = self.store_repo.create(name).await?;
        info!(store_id = store.id.0, "store created");
        self.expand(store).await
    }

    async fn get_store(&self, store_id: StoreId) -> Result<Store, CatalogError> {
        let store = self
            .store_repo
            .get(store_id)
            .await?
            .ok_or(CatalogError::NotFound("Store"))?;
        self.expand(store).await
    }

    async fn delete_store(&self, store_id: StoreId) -> Result<(), CatalogError> {
        if !self.store_repo.delete(store_id).await? {
            return Err(CatalogError::NotFound("Store"));
        }
        info!(store_id = store_id.0, "store deleted");
        Ok(())
    }
}
