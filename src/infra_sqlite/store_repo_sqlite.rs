use super::util::is_dup_key;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::SqlitePool;

pub struct SqliteStoreRepo {
    pool: SqlitePool,
}

impl SqliteStoreRepo {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteStoreRepo { pool }
    }
}

fn to_store((id, name): (i64, String)) -> PlainStore {
    PlainStore {
        id: StoreId(id),
        name,
    }
}

#[async_trait::async_trait]
impl StoreRepo for SqliteStoreRepo {
    async fn list(&self) -> Result<Vec<PlainStore>, CatalogError> {
        let rows = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM stores ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        Ok(rows.into_iter().map(to_store).collect())
    }

    async fn create(&self, name: &str) -> Result<PlainStore, CatalogError> {
        let result = sqlx::query("INSERT INTO stores (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_dup_key(&e) {
                    CatalogError::Conflict("A store with that name already exists.".to_string())
                } else {
                    CatalogError::Store(e.to_string())
                }
            })?;

        Ok(PlainStore {
            id: StoreId(result.last_insert_rowid()),
            name: name.to_string(),
        })
    }

    async fn get(&self, store_id: StoreId) -> Result<Option<PlainStore>, CatalogError> {
        let row = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM stores WHERE id = ?")
            .bind(store_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| CatalogError::Store(format!("query store: {e}")))?;

        Ok(row.map(to_store))
    }

    async fn delete(&self, store_id: StoreId) -> Result<bool, CatalogError> {
        let result = sqlx::query("DELETE FROM stores WHERE id = ?")
            .bind(store_id)
            .execute(&self.pool)
            .await
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
