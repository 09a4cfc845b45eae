use crate::application_port::*;
use crate::domain_model::*;

#[async_trait::async_trait]
pub trait StoreRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<PlainStore>, CatalogError>;
    /// Fails with `Conflict` when the name is taken.
    async fn create(&self, name: &str) -> Result<PlainStore, CatalogError>;
    async fn get(&self, store_id: StoreId) -> Result<Option<PlainStore>, CatalogError>;
    /// Deleting a store removes its items and tags with it.
    async fn delete(&self, store_id: StoreId) -> Result<bool, CatalogError>;
}
