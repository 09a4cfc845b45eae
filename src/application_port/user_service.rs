use crate::application_port::AuthError;
use crate::domain_model::{User, UserId};

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    async fn get_user(&self, user_id: UserId) -> Result<User, AuthError>;
    async fn delete_user(&self, user_id: UserId) -> Result<(), AuthError>;
}
