use crate::application_port::AuthError;
use crate::domain_model::*;
use jsonwebtoken::Header;

/// Callbacks invoked by the token guard at fixed points of request
/// authentication. The `on_*` methods build the 401 body for each rejection
/// and come with the stock bodies; implementors normally only supply the
/// revocation lookup and the claims policy.
#[async_trait::async_trait]
pub trait TokenLifecycleHooks: Send + Sync {
    async fn is_revoked(&self, header: &Header, claims: &TokenClaims) -> Result<bool, AuthError>;

    async fn additional_claims(&self, identity: UserId) -> Result<AdditionalClaims, AuthError>;

    fn on_revoked(&self, _header: &Header, _claims: &TokenClaims) -> TokenErrorBody {
        TokenErrorBody::with_description(
            TokenRejection::TokenRevoked,
            "token_revoked",
            "The token has been revoked.",
        )
    }

    fn on_not_fresh(&self, _header: &Header, _claims: &TokenClaims) -> TokenErrorBody {
        TokenErrorBody::with_description(
            TokenRejection::TokenNotFresh,
            "fresh_token_required",
            "The token is not fresh.",
        )
    }

    fn on_expired(&self, _header: &Header, _claims: &TokenClaims) -> TokenErrorBody {
        TokenErrorBody::with_message(
            TokenRejection::TokenExpired,
            "invalid token",
            "Signature verification failed.",
        )
    }

    fn on_invalid_signature(&self, _reason: &str) -> TokenErrorBody {
        TokenErrorBody::with_message(
            TokenRejection::TokenInvalidSignature,
            "invalid_token",
            "Signature verification failed.",
        )
    }

    fn on_missing_token(&self, _reason: &str) -> TokenErrorBody {
        TokenErrorBody::with_description(
            TokenRejection::TokenMissing,
            "authorized_required",
            "Request does not contain an access token.",
        )
    }
}
