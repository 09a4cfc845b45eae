use crate::domain_model::*;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("user already exists")]
    UserExists,
    #[error("user not found")]
    UserNotFound,
    #[error("token rejected: {}", .0.reason)]
    Rejected(TokenErrorBody),
    #[error("admin privilege required")]
    AdminRequired,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("store error: {0}")]
    Store(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessToken(pub String);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshToken(pub String);

#[derive(Debug, Clone, Serialize)]
pub struct AuthTokens {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
}

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: TokenClaims,
}

/// A token whose signature and structure have been verified. Expiry is not
/// checked at this stage.
#[derive(Debug, Clone)]
pub struct DecodedToken {
    pub header: jsonwebtoken::Header,
    pub claims: TokenClaims,
}

#[derive(Debug, thiserror::Error)]
#[error("malformed token: {0}")]
pub struct MalformedToken(pub String);

pub trait TokenCodec: Send + Sync {
    fn issue(
        &self,
        identity: UserId,
        token_type: TokenType,
        fresh: bool,
        additional: AdditionalClaims,
    ) -> Result<IssuedToken, AuthError>;

    fn decode(&self, token: &str) -> Result<DecodedToken, MalformedToken>;
}

#[async_trait::async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError>;
    async fn verify_password(&self, password: &str, password_hash: &str)
    -> Result<bool, AuthError>;
}

/// Computes the authorization claims embedded into every token issued for an
/// identity.
#[async_trait::async_trait]
pub trait ClaimsAugmenter: Send + Sync {
    async fn additional_claims(&self, identity: UserId) -> Result<AdditionalClaims, AuthError>;
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    async fn register(&self, request: RegisterInput) -> Result<UserId, AuthError>;
    async fn login(&self, request: LoginInput) -> Result<AuthTokens, AuthError>;
    /// Exchanges a refresh token for a non-fresh access token and revokes the
    /// refresh token.
    async fn refresh(&self, refresh: &AuthContext) -> Result<AccessToken, AuthError>;
    async fn logout(&self, access: &AuthContext) -> Result<(), AuthError>;
}
