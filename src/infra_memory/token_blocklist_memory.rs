use crate::application_port::*;
use crate::domain_port::*;
use chrono::{DateTime, Utc};
use dashmap::DashSet;

/// Process-local blocklist. Entries are never evicted, and a restart forgets
/// every revocation.
#[derive(Debug, Default)]
pub struct MemoryTokenBlocklist {
    revoked: DashSet<String>,
}

impl MemoryTokenBlocklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.revoked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revoked.is_empty()
    }
}

#[async_trait::async_trait]
impl TokenBlocklist for MemoryTokenBlocklist {
    async fn add(&self, jti: &str, _expires_at: DateTime<Utc>) -> Result<(), AuthError> {
        self.revoked.insert(jti.to_string());
        Ok(())
    }

    async fn contains(&self, jti: &str) -> Result<bool, AuthError> {
        Ok(self.revoked.contains(jti))
    }
}
