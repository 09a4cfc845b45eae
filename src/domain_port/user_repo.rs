use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::repo_tx::StorageTx;

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user_id: UserId,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
}

#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    /// Insert a user. Fails with `UserExists` when the username is taken.
    async fn create_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        username: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<UserId, AuthError>;

    async fn count_in_tx(&self, tx: &mut dyn StorageTx) -> Result<i64, AuthError>;

    /// Fetch credentials by username (for login).
    async fn get_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError>;

    async fn get(&self, user_id: UserId) -> Result<Option<UserRecord>, AuthError>;

    /// Returns false when no row was deleted.
    async fn delete(&self, user_id: UserId) -> Result<bool, AuthError>;
}
