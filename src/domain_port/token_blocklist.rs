use crate::application_port::*;
use chrono::{DateTime, Utc};

/// Set of revoked token identifiers consulted on every authenticated request.
#[async_trait::async_trait]
pub trait TokenBlocklist: Send + Sync {
    /// Revoke `jti`. Adding an identifier twice is the same as adding it once.
    /// `expires_at` is the token's own expiry; backends may forget the entry
    /// after that instant since the token is unusable anyway.
    async fn add(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<(), AuthError>;
    async fn contains(&self, jti: &str) -> Result<bool, AuthError>;
}
