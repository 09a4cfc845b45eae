use super::util::{downcast, is_dup_key};
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::SqlitePool;

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteUserRepo { pool }
    }

    fn row_to_record(row: (i64, String, String, bool)) -> UserRecord {
        let (id, username, password_hash, is_admin) = row;
        UserRecord {
            user_id: UserId(id),
            username,
            password_hash,
            is_admin,
        }
    }
}

#[async_trait::async_trait]
impl UserRepo for SqliteUserRepo {
    async fn create_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        username: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<UserId, AuthError> {
        let tx = downcast(tx).map_err(|e| AuthError::InternalError(e.to_string()))?;

        let result = sqlx::query(
            r#"
INSERT INTO users (username, password_hash, is_admin)
VALUES (?, ?, ?)
"#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(is_admin)
        .execute(tx.conn())
        .await
        .map_err(|e| {
            if is_dup_key(&e) {
                AuthError::UserExists
            } else {
                AuthError::Store(e.to_string())
            }
        })?;

        Ok(UserId(result.last_insert_rowid()))
    }

    async fn count_in_tx(&self, tx: &mut dyn StorageTx) -> Result<i64, AuthError> {
        let tx = downcast(tx).map_err(|e| AuthError::InternalError(e.to_string()))?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(tx.conn())
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        Ok(count)
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError> {
        let row = sqlx::query_as::<_, (i64, String, String, bool)>(
            r#"
SELECT id, username, password_hash, is_admin
FROM users
WHERE username = ?
"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Store(format!("query user by name: {e}")))?;

        Ok(row.map(Self::row_to_record))
    }

    async fn get(&self, user_id: UserId) -> Result<Option<UserRecord>, AuthError> {
        let row = sqlx::query_as::<_, (i64, String, String, bool)>(
            r#"
SELECT id, username, password_hash, is_admin
FROM users
WHERE id = ?
"#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Store(format!("query user: {e}")))?;

        Ok(row.map(Self::row_to_record))
    }

    async fn delete(&self, user_id: UserId) -> Result<bool, AuthError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
