use crate::application_port::*;
use crate::domain_model::*;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

/// Steps a request goes through before it reaches a protected handler. Any
/// failed step ends the request with a rejection body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardPhase {
    Received,
    SignatureChecked,
    RevocationChecked,
    FreshnessChecked,
    ClaimsAttached,
    Authorized,
}

/// Authenticates bearer tokens. Checks run in the order missing header,
/// signature, expiry, token type, revocation, freshness, claims, and stop at
/// the first failure.
pub struct TokenGuard {
    codec: Arc<dyn TokenCodec>,
    hooks: Arc<dyn TokenLifecycleHooks>,
}

impl TokenGuard {
    pub fn new(codec: Arc<dyn TokenCodec>, hooks: Arc<dyn TokenLifecycleHooks>) -> Self {
        TokenGuard { codec, hooks }
    }

    pub async fn authorize(
        &self,
        authorization: Option<&str>,
        requirement: TokenRequirement,
    ) -> Result<AuthContext, AuthError> {
        debug!(phase = ?GuardPhase::Received, ?requirement);

        let raw = match authorization.map(bearer_token) {
            None => return Err(self.reject(self.hooks.on_missing_token("Missing Authorization Header"))),
            Some(Err(BearerError::Missing(reason))) => {
                return Err(self.reject(self.hooks.on_missing_token(reason)));
            }
            Some(Err(BearerError::Malformed(reason))) => {
                return Err(self.reject(self.hooks.on_invalid_signature(reason)));
            }
            Some(Ok(token)) => token,
        };

        let DecodedToken { header, claims } = match self.codec.decode(raw) {
            Ok(decoded) => decoded,
            Err(e) => return Err(self.reject(self.hooks.on_invalid_signature(&e.0))),
        };
        debug!(phase = ?GuardPhase::SignatureChecked, jti = %claims.jti);

        if claims.exp <= Utc::now().timestamp() {
            return Err(self.reject(self.hooks.on_expired(&header, &claims)));
        }

        let expected = requirement.token_type();
        if claims.token_type != expected {
            let reason = match expected {
                TokenType::Access => "Only non-refresh tokens are allowed",
                TokenType::Refresh => "Only refresh tokens are allowed",
            };
            return Err(self.reject(self.hooks.on_invalid_signature(reason)));
        }

        if self.hooks.is_revoked(&header, &claims).await? {
            return Err(self.reject(self.hooks.on_revoked(&header, &claims)));
        }
        debug!(phase = ?GuardPhase::RevocationChecked, jti = %claims.jti);

        if requirement.requires_fresh() {
            if !claims.fresh {
                return Err(self.reject(self.hooks.on_not_fresh(&header, &claims)));
            }
            debug!(phase = ?GuardPhase::FreshnessChecked, jti = %claims.jti);
        }

        let Some(identity) = claims.identity() else {
            return Err(self.reject(self.hooks.on_invalid_signature("subject is not a user id")));
        };
        debug!(phase = ?GuardPhase::ClaimsAttached, %identity, is_admin = claims.additional.is_admin);

        debug!(phase = ?GuardPhase::Authorized, %identity);
        Ok(AuthContext { identity, claims })
    }

    fn reject(&self, body: TokenErrorBody) -> AuthError {
        info!(reason = %body.reason, "token rejected");
        AuthError::Rejected(body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BearerError {
    Missing(&'static str),
    Malformed(&'static str),
}

/// Picks the single `Bearer` field out of a possibly comma separated
/// `Authorization` value, e.g. `Basic x, Bearer <jwt>`.
fn bearer_token(authorization: &str) -> Result<&str, BearerError> {
    let value = authorization.trim().trim_matches(',');
    if value.is_empty() {
        return Err(BearerError::Missing("Missing Authorization Header"));
    }

    let mut fields = value
        .split(',')
        .map(str::trim_start)
        .filter(|field| field.split_whitespace().next() == Some("Bearer"));
    let (Some(field), None) = (fields.next(), fields.next()) else {
        return Err(BearerError::Missing(
            "Missing 'Bearer' type in 'Authorization' header",
        ));
    };

    let mut words = field.split_whitespace().skip(1);
    match (words.next(), words.next()) {
        (Some(token), None) => Ok(token),
        _ => Err(BearerError::Malformed(
            "Bad Authorization header. Expected 'Authorization: Bearer <JWT>'",
        )),
    }
}

pub fn require_admin(context: &AuthContext) -> Result<(), AuthError> {
    if context.is_admin() {
        Ok(())
    } else {
        Err(AuthError::AdminRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_impl::{
        BlocklistTokenHooks, BootstrapAdminClaims, JwtConfig, JwtHs256Codec,
    };
    use crate::domain_port::TokenBlocklist;
    use crate::infra_memory::MemoryTokenBlocklist;
    use chrono::Duration;

    struct Fixture {
        guard: TokenGuard,
        live: Arc<JwtHs256Codec>,
        expired: JwtHs256Codec,
        blocklist: Arc<MemoryTokenBlocklist>,
    }

    fn config(access_ttl: Duration) -> JwtConfig {
        JwtConfig {
            access_ttl,
            refresh_ttl: Duration::days(30),
            signing_key: b"guard-test".to_vec(),
        }
    }

    fn fixture() -> Fixture {
        let live = Arc::new(JwtHs256Codec::new(config(Duration::minutes(15))));
        let blocklist = Arc::new(MemoryTokenBlocklist::new());
        let hooks = Arc::new(BlocklistTokenHooks::new(
            blocklist.clone(),
            Arc::new(BootstrapAdminClaims::new(UserId(1))),
        ));
        Fixture {
            guard: TokenGuard::new(live.clone(), hooks),
            live,
            expired: JwtHs256Codec::new(config(Duration::seconds(-30))),
            blocklist,
        }
    }

    fn bearer(token: &IssuedToken) -> String {
        format!("Bearer {}", token.token)
    }

    fn rejection(result: Result<AuthContext, AuthError>) -> TokenErrorBody {
        match result {
            Err(AuthError::Rejected(body)) => body,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_or_non_bearer_header_is_missing_token() {
        let f = fixture();

        let body = rejection(f.guard.authorize(None, TokenRequirement::Access).await);
        assert_eq!(body.reason, TokenRejection::TokenMissing);
        assert_eq!(body.error, "authorized_required");
        assert_eq!(
            body.description.as_deref(),
            Some("Request does not contain an access token.")
        );

        let body = rejection(
            f.guard
                .authorize(Some("Basic abc"), TokenRequirement::Access)
                .await,
        );
        assert_eq!(body.reason, TokenRejection::TokenMissing);
    }

    #[test]
    fn bearer_field_is_found_in_comma_separated_values() {
        assert_eq!(bearer_token("Bearer abc"), Ok("abc"));
        assert_eq!(bearer_token("Basic x, Bearer abc"), Ok("abc"));
        assert_eq!(bearer_token("Bearer abc,Basic x"), Ok("abc"));
        assert!(matches!(bearer_token(""), Err(BearerError::Missing(_))));
        assert!(matches!(bearer_token("Basic x"), Err(BearerError::Missing(_))));
        assert!(matches!(
            bearer_token("Bearer a, Bearer b"),
            Err(BearerError::Missing(_))
        ));
        assert!(matches!(bearer_token("Bearer"), Err(BearerError::Malformed(_))));
        assert!(matches!(
            bearer_token("Bearer a b"),
            Err(BearerError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn bare_bearer_is_invalid_not_missing() {
        let f = fixture();
        let body = rejection(
            f.guard
                .authorize(Some("Bearer"), TokenRequirement::Access)
                .await,
        );
        assert_eq!(body.reason, TokenRejection::TokenInvalidSignature);
        assert_eq!(body.error, "invalid_token");
        assert_eq!(body.message.as_deref(), Some("Signature verification failed."));
    }

    #[tokio::test]
    async fn bearer_after_another_scheme_is_accepted() {
        let f = fixture();
        let token = f
            .live
            .issue(UserId(2), TokenType::Access, true, AdditionalClaims::default())
            .unwrap();
        let header = format!("Basic dXNlcjpwdw==, {}", bearer(&token));

        let ctx = f
            .guard
            .authorize(Some(&header), TokenRequirement::Access)
            .await
            .unwrap();
        assert_eq!(ctx.identity, UserId(2));
    }

    #[tokio::test]
    async fn garbage_token_is_invalid_signature() {
        let f = fixture();
        let body = rejection(
            f.guard
                .authorize(Some("Bearer nope"), TokenRequirement::Access)
                .await,
        );
        assert_eq!(body.error, "invalid_token");
        assert_eq!(body.message.as_deref(), Some("Signature verification failed."));
    }

    #[tokio::test]
    async fn valid_access_token_is_authorized_with_claims() {
        let f = fixture();
        let token = f
            .live
            .issue(UserId(1), TokenType::Access, true, AdditionalClaims { is_admin: true })
            .unwrap();

        let ctx = f
            .guard
            .authorize(Some(&bearer(&token)), TokenRequirement::FreshAccess)
            .await
            .unwrap();
        assert_eq!(ctx.identity, UserId(1));
        assert!(ctx.is_admin());
        assert!(require_admin(&ctx).is_ok());
    }

    #[tokio::test]
    async fn revoked_token_is_rejected() {
        let f = fixture();
        let token = f
            .live
            .issue(UserId(2), TokenType::Access, true, AdditionalClaims::default())
            .unwrap();
        f.blocklist
            .add(&token.claims.jti, token.claims.expires_at())
            .await
            .unwrap();

        let body = rejection(
            f.guard
                .authorize(Some(&bearer(&token)), TokenRequirement::Access)
                .await,
        );
        assert_eq!(body.reason, TokenRejection::TokenRevoked);
        assert_eq!(body.error, "token_revoked");
        assert_eq!(body.description.as_deref(), Some("The token has been revoked."));
    }

    #[tokio::test]
    async fn expiry_wins_over_revocation() {
        let f = fixture();
        let token = f
            .expired
            .issue(UserId(2), TokenType::Access, true, AdditionalClaims::default())
            .unwrap();
        f.blocklist
            .add(&token.claims.jti, token.claims.expires_at())
            .await
            .unwrap();

        let body = rejection(
            f.guard
                .authorize(Some(&bearer(&token)), TokenRequirement::Access)
                .await,
        );
        assert_eq!(body.reason, TokenRejection::TokenExpired);
        assert_eq!(body.error, "invalid token");
        assert_eq!(body.message.as_deref(), Some("Signature verification failed."));
    }

    #[tokio::test]
    async fn non_fresh_token_fails_fresh_requirement_only() {
        let f = fixture();
        let token = f
            .live
            .issue(UserId(2), TokenType::Access, false, AdditionalClaims::default())
            .unwrap();

        let body = rejection(
            f.guard
                .authorize(Some(&bearer(&token)), TokenRequirement::FreshAccess)
                .await,
        );
        assert_eq!(body.reason, TokenRejection::TokenNotFresh);
        assert_eq!(body.error, "fresh_token_required");

        let ctx = f
            .guard
            .authorize(Some(&bearer(&token)), TokenRequirement::Access)
            .await
            .unwrap();
        assert!(!ctx.is_admin());
        assert!(matches!(require_admin(&ctx), Err(AuthError::AdminRequired)));
    }

    #[tokio::test]
    async fn token_type_must_match_requirement() {
        let f = fixture();
        let refresh = f
            .live
            .issue(UserId(2), TokenType::Refresh, false, AdditionalClaims::default())
            .unwrap();
        let access = f
            .live
            .issue(UserId(2), TokenType::Access, true, AdditionalClaims::default())
            .unwrap();

        let body = rejection(
            f.guard
                .authorize(Some(&bearer(&refresh)), TokenRequirement::Access)
                .await,
        );
        assert_eq!(body.reason, TokenRejection::TokenInvalidSignature);

        let body = rejection(
            f.guard
                .authorize(Some(&bearer(&access)), TokenRequirement::Refresh)
                .await,
        );
        assert_eq!(body.reason, TokenRejection::TokenInvalidSignature);

        assert!(
            f.guard
                .authorize(Some(&bearer(&refresh)), TokenRequirement::Refresh)
                .await
                .is_ok()
        );
    }
}
