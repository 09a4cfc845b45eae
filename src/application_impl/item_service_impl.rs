use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use std::sync::Arc;
use tracing::info;

pub struct RealItemService {
    item_repo: Arc<dyn ItemRepo>,
    store_repo: Arc<dyn StoreRepo>,
    tag_repo: Arc<dyn TagRepo>,
    tx_manager: Arc<dyn TxManager>,
}

impl RealItemService {
    pub fn new(
        item_repo: Arc<dyn ItemRepo>,
        store_repo: Arc<dyn StoreRepo>,
        tag_repo: Arc<dyn TagRepo>,
        tx_manager: Arc<dyn TxManager>,
    ) -> Self {
        Self {
            item_repo,
            store_repo,
            tag_repo,
            tx_manager,
        }
    }

    /// Returns the trimmed name.
    fn validate(name: &str, price: f64) -> Result<String, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::Validation("name must not be blank".to_string()));
        }
        if !price.is_finite() {
            return Err(CatalogError::Validation("price must be a number".to_string()));
        }
        Ok(name.to_string())
    }

    async fn store_of(&self, store_id: StoreId) -> Result<PlainStore, CatalogError> {
        store_of(self.store_repo.as_ref(), store_id).await
    }

    async fn expand(&self, rec: ItemRecord) -> Result<Item, CatalogError> {
        expand_item(self.store_repo.as_ref(), self.tag_repo.as_ref(), rec).await
    }

    async fn load(&self, item_id: ItemId) -> Result<Item, CatalogError> {
        let rec = self
            .item_repo
            .get(item_id)
            .await?
            .ok_or(CatalogError::NotFound("Item"))?;
        self.expand(rec).await
    }
}

pub(super) async fn store_of(
    store_repo: &dyn StoreRepo,
    store_id: StoreId,
) -> Result<PlainStore, CatalogError> {
    store_repo
        .get(store_id)
        .await?
        .ok_or(CatalogError::NotFound("Store"))
}

/// Item with its store and tags attached.
pub(super) async fn expand_item(
    store_repo: &dyn StoreRepo,
    tag_repo: &dyn TagRepo,
    rec: ItemRecord,
) -> Result<Item, CatalogError> {
    let store = store_of(store_repo, rec.store_id).await?;
    let tags = tag_repo.list_by_item(rec.item_id).await?;
    Ok(Item {
        id: rec.item_id,
        name: rec.name,
        price: rec.price,
        store_id: rec.store_id,
        store,
        tags,
    })
}

#[async_trait::async_trait]
impl ItemService for RealItemService {
    async fn list_items(&self) -> Result<Vec<Item>, CatalogError> {
        let mut items = Vec::new();
        for rec in self.item_repo.list().await? {
            items.push(self.expand(rec).await?);
        }
        Ok(items)
    }

    async fn create_item(&self, item: NewItem) -> Result<Item, CatalogError> {
        let item = NewItem {
            name: Self::validate(&item.name, item.price)?,
            ..item
        };
        self.store_of(item.store_id).await?;

        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let item_id = self.item_repo.insert_in_tx(tx.as_mut(), None, &item).await?;
        tx.commit()
            .await
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        info!(item_id = item_id.0, store_id = item.store_id.0, "item created");
        self.load(item_id).await
    }

    async fn get_item(&self, item_id: ItemId) -> Result<Item, CatalogError> {
        self.load(item_id).await
    }

    async fn put_item(&self, item_id: ItemId, update: ItemUpdate) -> Result<Item, CatalogError> {
        let update = ItemUpdate {
            name: Self::validate(&update.name, update.price)?,
            ..update
        };

        // Resolve the target store up front; the transaction below must not
        // wait on a second pool connection.
        let new_item = match self.item_repo.get(item_id).await? {
            Some(_) => None,
            None => {
                let store_id = update.store_id.ok_or_else(|| {
                    CatalogError::Validation("store_id is required to create an item".to_string())
                })?;
                self.store_of(store_id).await?;
                Some(NewItem {
                    name: update.name.clone(),
                    price: update.price,
                    store_id,
                })
            }
        };

        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let existing = self.item_repo.get_in_tx(tx.as_mut(), item_id).await?;
        match (existing, new_item) {
            (Some(_), _) => {
                self.item_repo
                    .update_in_tx(tx.as_mut(), item_id, &update.name, update.price)
                    .await?;
            }
            (None, Some(new_item)) => {
                self.item_repo
                    .insert_in_tx(tx.as_mut(), Some(item_id), &new_item)
                    .await?;
            }
            (None, None) => return Err(CatalogError::NotFound("Item")),
        }
        tx.commit()
            .await
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        self.load(item_id).await
    }

    async fn delete_item(&self, item_id: ItemId) -> Result<(), CatalogError> {
        if !self.item_repo.delete(item_id).await? {
            return Err(CatalogError::NotFound("Item"));
        }
        info!(item_id = item_id.0, "item deleted");
        Ok(())
    }
}
