use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use std::sync::Arc;
use tracing::info;

pub struct RealAuthService {
    user_repo: Arc<dyn UserRepo>,
    credential_hasher: Arc<dyn CredentialHasher>,
    token_codec: Arc<dyn TokenCodec>,
    hooks: Arc<dyn TokenLifecycleHooks>,
    blocklist: Arc<dyn TokenBlocklist>,
    tx_manager: Arc<dyn TxManager>,
}

impl RealAuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        credential_hasher: Arc<dyn CredentialHasher>,
        token_codec: Arc<dyn TokenCodec>,
        hooks: Arc<dyn TokenLifecycleHooks>,
        blocklist: Arc<dyn TokenBlocklist>,
        tx_manager: Arc<dyn TxManager>,
    ) -> Self {
        Self {
            user_repo,
            credential_hasher,
            token_codec,
            hooks,
            blocklist,
            tx_manager,
        }
    }

    fn validate_register(username: &str, password: &str) -> Result<(), AuthError> {
        if username.trim().is_empty() {
            return Err(AuthError::InvalidInput("username must not be blank".to_string()));
        }
        if password.is_empty() {
            return Err(AuthError::InvalidInput("password must not be blank".to_string()));
        }
        Ok(())
    }

    async fn issue(
        &self,
        identity: UserId,
        token_type: TokenType,
        fresh: bool,
    ) -> Result<IssuedToken, AuthError> {
        let additional = self.hooks.additional_claims(identity).await?;
        self.token_codec
            .issue(identity, token_type, fresh, additional)
    }
}

#[async_trait::async_trait]
impl AuthService for RealAuthService {
    async fn register(&self, request: RegisterInput) -> Result<UserId, AuthError> {
        let RegisterInput { username, password } = request;

        Self::validate_register(&username, &password)?;

        let password_hash = self.credential_hasher.hash_password(&password).await?;

        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        // The first account becomes the administrator.
        let is_admin = self.user_repo.count_in_tx(tx.as_mut()).await? == 0;
        let user_id = self
            .user_repo
            .create_in_tx(tx.as_mut(), &username, &password_hash, is_admin)
            .await?;

        tx.commit()
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        info!(%user_id, is_admin, "user registered");
        Ok(user_id)
    }

    async fn login(&self, request: LoginInput) -> Result<AuthTokens, AuthError> {
        let LoginInput { username, password } = request;

        let rec = self
            .user_repo
            .get_by_username(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let ok = self
            .credential_hasher
            .verify_password(&password, &rec.password_hash)
            .await?;
        if !ok {
            return Err(AuthError::InvalidCredentials);
        }

        let access = self.issue(rec.user_id, TokenType::Access, true).await?;
        let refresh = self.issue(rec.user_id, TokenType::Refresh, false).await?;

        info!(user_id = %rec.user_id, "user logged in");
        Ok(AuthTokens {
            access_token: AccessToken(access.token),
            refresh_token: RefreshToken(refresh.token),
        })
    }

    async fn refresh(&self, refresh: &AuthContext) -> Result<AccessToken, AuthError> {
        let access = self.issue(refresh.identity, TokenType::Access, false).await?;

        // Rotation: a refresh token is good for one exchange.
        self.blocklist
            .add(refresh.jti(), refresh.claims.expires_at())
            .await?;

        info!(user_id = %refresh.identity, "access token refreshed");
        Ok(AccessToken(access.token))
    }

    async fn logout(&self, access: &AuthContext) -> Result<(), AuthError> {
        self.blocklist
            .add(access.jti(), access.claims.expires_at())
            .await?;

        info!(user_id = %access.identity, "user logged out");
        Ok(())
    }
}
