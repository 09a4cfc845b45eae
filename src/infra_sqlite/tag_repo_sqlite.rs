use super::util::{downcast, is_dup_key};
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::SqlitePool;

pub struct SqliteTagRepo {
    pool: SqlitePool,
}

impl SqliteTagRepo {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteTagRepo { pool }
    }

    fn row_to_record(row: (i64, String, i64)) -> TagRecord {
        let (id, name, store_id) = row;
        TagRecord {
            tag_id: TagId(id),
            name,
            store_id: StoreId(store_id),
        }
    }
}

#[async_trait::async_trait]
impl TagRepo for SqliteTagRepo {
    async fn list_by_store(&self, store_id: StoreId) -> Result<Vec<TagRecord>, CatalogError> {
        let rows = sqlx::query_as::<_, (i64, String, i64)>(
            "SELECT id, name, store_id FROM tags WHERE store_id = ? ORDER BY id",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::Store(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_record).collect())
    }

    async fn list_by_item(&self, item_id: ItemId) -> Result<Vec<PlainTag>, CatalogError> {
        let rows = sqlx::query_as::<_, (i64, String)>(
            r#"
SELECT t.id, t.name
FROM tags t
JOIN items_tags it ON it.tag_id = t.id
WHERE it.item_id = ?
ORDER BY t.id
"#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::Store(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| PlainTag { id: TagId(id), name })
            .collect())
    }

    async fn create(&self, store_id: StoreId, name: &str) -> Result<TagRecord, CatalogError> {
        let result = sqlx::query("INSERT INTO tags (name, store_id) VALUES (?, ?)")
            .bind(name)
            .bind(store_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_dup_key(&e) {
                    CatalogError::Conflict(
                        "A tag with that name already exists in that store.".to_string(),
                    )
                } else {
                    CatalogError::Store(e.to_string())
                }
            })?;

        Ok(TagRecord {
            tag_id: TagId(result.last_insert_rowid()),
            name: name.to_string(),
            store_id,
        })
    }

    async fn get(&self, tag_id: TagId) -> Result<Option<TagRecord>, CatalogError> {
        let row = sqlx::query_as::<_, (i64, String, i64)>(
            "SELECT id, name, store_id FROM tags WHERE id = ?",
        )
        .bind(tag_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CatalogError::Store(format!("query tag: {e}")))?;

        Ok(row.map(Self::row_to_record))
    }

    async fn delete_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        tag_id: TagId,
    ) -> Result<bool, CatalogError> {
        let tx = downcast(tx).map_err(|e| CatalogError::Store(e.to_string()))?;

        let result = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(tag_id)
            .execute(tx.conn())
            .await
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_links_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        tag_id: TagId,
    ) -> Result<i64, CatalogError> {
        let tx = downcast(tx).map_err(|e| CatalogError::Store(e.to_string()))?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items_tags WHERE tag_id = ?")
            .bind(tag_id)
            .fetch_one(tx.conn())
            .await
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        Ok(count)
    }

    async fn link(&self, item_id: ItemId, tag_id: TagId) -> Result<(), CatalogError> {
        sqlx::query("INSERT OR IGNORE INTO items_tags (item_id, tag_id) VALUES (?, ?)")
            .bind(item_id)
            .bind(tag_id)
            .execute(&self.pool)
            .await
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        Ok(())
    }

    async fn unlink(&self, item_id: ItemId, tag_id: TagId) -> Result<bool, CatalogError> {
        let result = sqlx::query("DELETE FROM items_tags WHERE item_id = ? AND tag_id = ?")
            .bind(item_id)
            .bind(tag_id)
            .execute(&self.pool)
            .await
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
