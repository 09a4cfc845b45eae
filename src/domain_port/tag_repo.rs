use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::repo_tx::StorageTx;

#[derive(Debug, Clone, PartialEq)]
pub struct TagRecord {
    pub tag_id: TagId,
    pub name: String,
    pub store_id: StoreId,
}

impl TagRecord {
    pub fn plain(&self) -> PlainTag {
        PlainTag {
            id: self.tag_id,
            name: self.name.clone(),
        }
    }
}

#[async_trait::async_trait]
pub trait TagRepo: Send + Sync {
    async fn list_by_store(&self, store_id: StoreId) -> Result<Vec<TagRecord>, CatalogError>;
    async fn list_by_item(&self, item_id: ItemId) -> Result<Vec<PlainTag>, CatalogError>;
    /// Fails with `Conflict` when the store already has a tag with that name.
    async fn create(&self, store_id: StoreId, name: &str) -> Result<TagRecord, CatalogError>;
    async fn get(&self, tag_id: TagId) -> Result<Option<TagRecord>, CatalogError>;
    async fn delete_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        tag_id: TagId,
    ) -> Result<bool, CatalogError>;
    async fn count_links_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        tag_id: TagId,
    ) -> Result<i64, CatalogError>;
    /// Linking an already linked pair is a no-op.
    async fn link(&self, item_id: ItemId, tag_id: TagId) -> Result<(), CatalogError>;
    async fn unlink(&self, item_id: ItemId, tag_id: TagId) -> Result<bool, CatalogError>;
}
