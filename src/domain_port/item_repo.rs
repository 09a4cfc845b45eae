use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::repo_tx::StorageTx;

#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub item_id: ItemId,
    pub name: String,
    pub price: f64,
    pub store_id: StoreId,
}

#[async_trait::async_trait]
pub trait ItemRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<ItemRecord>, CatalogError>;
    async fn list_by_store(&self, store_id: StoreId) -> Result<Vec<PlainItem>, CatalogError>;
    async fn list_by_tag(&self, tag_id: TagId) -> Result<Vec<PlainItem>, CatalogError>;
    async fn get(&self, item_id: ItemId) -> Result<Option<ItemRecord>, CatalogError>;
    async fn get_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        item_id: ItemId,
    ) -> Result<Option<ItemRecord>, CatalogError>;

    /// Insert an item. A `None` id lets the database assign one. Fails with
    /// `Conflict` when the store already has an item with that name.
    async fn insert_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        item_id: Option<ItemId>,
        item: &NewItem,
    ) -> Result<ItemId, CatalogError>;

    async fn update_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        item_id: ItemId,
        name: &str,
        price: f64,
    ) -> Result<(), CatalogError>;

    async fn delete(&self, item_id: ItemId) -> Result<bool, CatalogError>;
}
