use super::item_service_impl::{expand_item, store_of};
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use std::sync::Arc;
use tracing::info;

pub struct RealTagService {
    tag_repo: Arc<dyn TagRepo>,
    store_repo: Arc<dyn StoreRepo>,
    item_repo: Arc<dyn ItemRepo>,
    tx_manager: Arc<dyn TxManager>,
}

impl RealTagService {
    pub fn new(
        tag_repo: Arc<dyn TagRepo>,
        store_repo: Arc<dyn StoreRepo>,
        item_repo: Arc<dyn ItemRepo>,
        tx_manager: Arc<dyn TxManager>,
    ) -> Self {
        Self {
            tag_repo,
            store_repo,
            item_repo,
            tx_manager,
        }
    }

    async fn store_of(&self, store_id: StoreId) -> Result<PlainStore, CatalogError> {
        store_of(self.store_repo.as_ref(), store_id).await
    }

    async fn tag_record(&self, tag_id: TagId) -> Result<TagRecord, CatalogError> {
        self.tag_repo
            .get(tag_id)
            .await?
            .ok_or(CatalogError::NotFound("Tag"))
    }

    async fn item_record(&self, item_id: ItemId) -> Result<ItemRecord, CatalogError> {
        self.item_repo
            .get(item_id)
            .await?
            .ok_or(CatalogError::NotFound("Item"))
    }

    async fn expand(&self, rec: TagRecord) -> Result<Tag, CatalogError> {
        let store = self.store_of(rec.store_id).await?;
        let items = self.item_repo.list_by_tag(rec.tag_id).await?;
        Ok(Tag {
            id: rec.tag_id,
            name: rec.name,
            store_id: rec.store_id,
            store,
            items,
        })
    }
}

#[async_trait::async_trait]
impl TagService for RealTagService {
    async fn list_tags_in_store(&self, store_id: StoreId) -> Result<Vec<Tag>, CatalogError> {
        self.store_of(store_id).await?;
        let mut tags = Vec::new();
        for rec in self.tag_repo.list_by_store(store_id).await? {
            tags.push(self.expand(rec).await?);
        }
        Ok(tags)
    }

    async fn create_tag_in_store(
        &self,
        store_id: StoreId,
        name: &str,
    ) -> Result<Tag, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::Validation("name must not be blank".to_string()));
        }
        self.store_of(store_id).await?;
        let rec = self.tag_repo.create(store_id, name).await?;
        info!(tag_id = rec.tag_id.0, store_id = store_id.0, "tag created");
        self.expand(rec).await
    }

    async fn get_tag(&self, tag_id: TagId) -> Result<Tag, CatalogError> {
        let rec = self.tag_record(tag_id).await?;
        self.expand(rec).await
    }

    async fn delete_tag(&self, tag_id: TagId) -> Result<(), CatalogError> {
        self.tag_record(tag_id).await?;

        // Link count and delete share one transaction.
        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        if self.tag_repo.count_links_in_tx(tx.as_mut(), tag_id).await? > 0 {
            tx.rollback()
                .await
                .map_err(|e| CatalogError::Store(e.to_string()))?;
            return Err(CatalogError::InvalidInput(
                "Could not delete tag. Make sure tag is not associated with any items, then try again."
                    .to_string(),
            ));
        }
        if !self.tag_repo.delete_in_tx(tx.as_mut(), tag_id).await? {
            return Err(CatalogError::NotFound("Tag"));
        }
        tx.commit()
            .await
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        info!(tag_id = tag_id.0, "tag deleted");
        Ok(())
    }

    async fn link_tag(&self, item_id: ItemId, tag_id: TagId) -> Result<Tag, CatalogError> {
        let item = self.item_record(item_id).await?;
        let tag = self.tag_record(tag_id).await?;
        if item.store_id != tag.store_id {
            return Err(CatalogError::InvalidInput(
                "Make sure item and tag belong to the same store before linking.".to_string(),
            ));
        }
        self.tag_repo.link(item_id, tag_id).await?;
        self.expand(tag).await
    }

    async fn unlink_tag(&self, item_id: ItemId, tag_id: TagId) -> Result<Unlinked, CatalogError> {
        let item = self.item_record(item_id).await?;
        let tag = self.tag_record(tag_id).await?;
        self.tag_repo.unlink(item_id, tag_id).await?;
        Ok(Unlinked {
            item: expand_item(self.store_repo.as_ref(), self.tag_repo.as_ref(), item).await?,
            tag: self.expand(tag).await?,
        })
    }
}
