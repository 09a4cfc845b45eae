use super::util::{downcast, is_dup_key};
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::SqlitePool;

pub struct SqliteItemRepo {
    pool: SqlitePool,
}

impl SqliteItemRepo {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteItemRepo { pool }
    }

    fn row_to_record(row: (i64, String, f64, i64)) -> ItemRecord {
        let (id, name, price, store_id) = row;
        ItemRecord {
            item_id: ItemId(id),
            name,
            price,
            store_id: StoreId(store_id),
        }
    }

    fn row_to_plain((id, name, price): (i64, String, f64)) -> PlainItem {
        PlainItem {
            id: ItemId(id),
            name,
            price,
        }
    }

    fn map_write_err(e: sqlx::Error) -> CatalogError {
        if is_dup_key(&e) {
            CatalogError::Conflict("An item with that name already exists in this store.".into())
        } else {
            CatalogError::Store(e.to_string())
        }
    }
}

#[async_trait::async_trait]
impl ItemRepo for SqliteItemRepo {
    async fn list(&self) -> Result<Vec<ItemRecord>, CatalogError> {
        let rows = sqlx::query_as::<_, (i64, String, f64, i64)>(
            "SELECT id, name, price, store_id FROM items ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::Store(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_record).collect())
    }

    async fn list_by_store(&self, store_id: StoreId) -> Result<Vec<PlainItem>, CatalogError> {
        let rows = sqlx::query_as::<_, (i64, String, f64)>(
            "SELECT id, name, price FROM items WHERE store_id = ? ORDER BY id",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::Store(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_plain).collect())
    }

    async fn list_by_tag(&self, tag_id: TagId) -> Result<Vec<PlainItem>, CatalogError> {
        let rows = sqlx::query_as::<_, (i64, String, f64)>(
            r#"
SELECT i.id, i.name, i.price
FROM items i
JOIN items_tags it ON it.item_id = i.id
WHERE it.tag_id = ?
ORDER BY i.id
"#,
        )
        .bind(tag_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CatalogError::Store(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_plain).collect())
    }

    async fn get(&self, item_id: ItemId) -> Result<Option<ItemRecord>, CatalogError> {
        let row = sqlx::query_as::<_, (i64, String, f64, i64)>(
            "SELECT id, name, price, store_id FROM items WHERE id = ?",
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CatalogError::Store(format!("query item: {e}")))?;

        Ok(row.map(Self::row_to_record))
    }

    async fn get_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        item_id: ItemId,
    ) -> Result<Option<ItemRecord>, CatalogError> {
        let tx = downcast(tx).map_err(|e| CatalogError::Store(e.to_string()))?;

        let row = sqlx::query_as::<_, (i64, String, f64, i64)>(
            "SELECT id, name, price, store_id FROM items WHERE id = ?",
        )
        .bind(item_id)
        .fetch_optional(tx.conn())
        .await
        .map_err(|e| CatalogError::Store(format!("query item: {e}")))?;

        Ok(row.map(Self::row_to_record))
    }

    async fn insert_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        item_id: Option<ItemId>,
        item: &NewItem,
    ) -> Result<ItemId, CatalogError> {
        let tx = downcast(tx).map_err(|e| CatalogError::Store(e.to_string()))?;

        let result = sqlx::query(
            r#"
INSERT INTO items (id, name, price, store_id)
VALUES (?, ?, ?, ?)
"#,
        )
        .bind(item_id)
        .bind(&item.name)
        .bind(item.price)
        .bind(item.store_id)
        .execute(tx.conn())
        .await
        .map_err(Self::map_write_err)?;

        Ok(ItemId(result.last_insert_rowid()))
    }

    async fn update_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        item_id: ItemId,
        name: &str,
        price: f64,
    ) -> Result<(), CatalogError> {
        let tx = downcast(tx).map_err(|e| CatalogError::Store(e.to_string()))?;

        sqlx::query("UPDATE items SET name = ?, price = ? WHERE id = ?")
            .bind(name)
            .bind(price)
            .bind(item_id)
            .execute(tx.conn())
            .await
            .map_err(Self::map_write_err)?;

        Ok(())
    }

    async fn delete(&self, item_id: ItemId) -> Result<bool, CatalogError> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(item_id)
            .execute(&self.pool)
            .await
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
