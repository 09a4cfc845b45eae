use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::TokenBlocklist;
use jsonwebtoken::Header;
use std::sync::Arc;

/// Hooks backed by a blocklist for revocation and a claims policy. Rejection
/// bodies are the trait defaults.
pub struct BlocklistTokenHooks {
    blocklist: Arc<dyn TokenBlocklist>,
    claims: Arc<dyn ClaimsAugmenter>,
}

impl BlocklistTokenHooks {
    pub fn new(blocklist: Arc<dyn TokenBlocklist>, claims: Arc<dyn ClaimsAugmenter>) -> Self {
        BlocklistTokenHooks { blocklist, claims }
    }
}

#[async_trait::async_trait]
impl TokenLifecycleHooks for BlocklistTokenHooks {
    async fn is_revoked(&self, _header: &Header, claims: &TokenClaims) -> Result<bool, AuthError> {
        self.blocklist.contains(&claims.jti).await
    }

    async fn additional_claims(&self, identity: UserId) -> Result<AdditionalClaims, AuthError> {
        self.claims.additional_claims(identity).await
    }
}
