use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::UserRepo;
use std::sync::Arc;

/// Grants admin to exactly one configured identity.
pub struct BootstrapAdminClaims {
    admin: UserId,
}

impl BootstrapAdminClaims {
    pub fn new(admin: UserId) -> Self {
        BootstrapAdminClaims { admin }
    }
}

#[async_trait::async_trait]
impl ClaimsAugmenter for BootstrapAdminClaims {
    async fn additional_claims(&self, identity: UserId) -> Result<AdditionalClaims, AuthError> {
        Ok(AdditionalClaims {
            is_admin: identity == self.admin,
        })
    }
}

/// Reads the admin flag from the stored user. Unknown users are not admins.
pub struct RoleLookupClaims {
    user_repo: Arc<dyn UserRepo>,
}

impl RoleLookupClaims {
    pub fn new(user_repo: Arc<dyn UserRepo>) -> Self {
        RoleLookupClaims { user_repo }
    }
}

#[async_trait::async_trait]
impl ClaimsAugmenter for RoleLookupClaims {
    async fn additional_claims(&self, identity: UserId) -> Result<AdditionalClaims, AuthError> {
        let is_admin = self
            .user_repo
            .get(identity)
            .await?
            .map(|rec| rec.is_admin)
            .unwrap_or(false);
        Ok(AdditionalClaims { is_admin })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn only_the_bootstrap_identity_is_admin() {
        let claims = BootstrapAdminClaims::new(UserId(1));

        assert!(claims.additional_claims(UserId(1)).await.unwrap().is_admin);
        for other in [0, 2, 42, -1] {
            let got = claims.additional_claims(UserId(other)).await.unwrap();
            assert_eq!(got, AdditionalClaims { is_admin: false });
        }
    }
}
