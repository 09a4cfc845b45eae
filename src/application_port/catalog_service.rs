use crate::domain_model::*;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0} not found.")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Validation(String),
    #[error("store error: {0}")]
    Store(String),
}

#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub price: f64,
    pub store_id: StoreId,
}

#[derive(Debug, Clone)]
pub struct ItemUpdate {
    pub name: String,
    pub price: f64,
    /// Only used when the item does not exist yet.
    pub store_id: Option<StoreId>,
}

/// Result of detaching an item from a tag.
#[derive(Debug, Clone)]
pub struct Unlinked {
    pub item: Item,
    pub tag: Tag,
}

#[async_trait::async_trait]
pub trait StoreService: Send + Sync {
    async fn list_stores(&self) -> Result<Vec<Store>, CatalogError>;
    async fn create_store(&self, name: &str) -> Result<Store, CatalogError>;
    async fn get_store(&self, store_id: StoreId) -> Result<Store, CatalogError>;
    async fn delete_store(&self, store_id: StoreId) -> Result<(), CatalogError>;
}

#[async_trait::async_trait]
pub trait ItemService: Send + Sync {
    async fn list_items(&self) -> Result<Vec<Item>, CatalogError>;
    async fn create_item(&self, item: NewItem) -> Result<Item, CatalogError>;
    async fn get_item(&self, item_id: ItemId) -> Result<Item, CatalogError>;
    /// Updates the item, or creates it under `item_id` when it does not exist.
    async fn put_item(&self, item_id: ItemId, update: ItemUpdate) -> Result<Item, CatalogError>;
    async fn delete_item(&self, item_id: ItemId) -> Result<(), CatalogError>;
}

#[async_trait::async_trait]
pub trait TagService: Send + Sync {
    async fn list_tags_in_store(&self, store_id: StoreId) -> Result<Vec<Tag>, CatalogError>;
    async fn create_tag_in_store(&self, store_id: StoreId, name: &str)
    -> Result<Tag, CatalogError>;
    async fn get_tag(&self, tag_id: TagId) -> Result<Tag, CatalogError>;
    async fn delete_tag(&self, tag_id: TagId) -> Result<(), CatalogError>;
    async fn link_tag(&self, item_id: ItemId, tag_id: TagId) -> Result<Tag, CatalogError>;
    async fn unlink_tag(&self, item_id: ItemId, tag_id: TagId) -> Result<Unlinked, CatalogError>;
}
