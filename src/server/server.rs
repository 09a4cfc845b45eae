use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_model::UserId;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_redis::*;
use crate::infra_sqlite::*;
use crate::logger::*;
use crate::settings::Settings;
use chrono::Duration;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Server {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub store_service: Arc<dyn StoreService>,
    pub item_service: Arc<dyn ItemService>,
    pub tag_service: Arc<dyn TagService>,
    pub token_guard: Arc<TokenGuard>,
    pool: SqlitePool,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let pool = connect(&settings.database.url, settings.database.max_connections).await?;
        migrate(&pool).await?;
        let tx_manager: Arc<dyn TxManager> = Arc::new(SqliteTxManager::new(pool.clone()));

        let user_repo: Arc<dyn UserRepo> = Arc::new(SqliteUserRepo::new(pool.clone()));
        let store_repo: Arc<dyn StoreRepo> = Arc::new(SqliteStoreRepo::new(pool.clone()));
        let item_repo: Arc<dyn ItemRepo> = Arc::new(SqliteItemRepo::new(pool.clone()));
        let tag_repo: Arc<dyn TagRepo> = Arc::new(SqliteTagRepo::new(pool.clone()));

        let blocklist: Arc<dyn TokenBlocklist> = match settings.blocklist.backend.as_str() {
            "memory" => Arc::new(MemoryTokenBlocklist::new()),
            "redis" => {
                let client = redis::Client::open(settings.blocklist.redis_url.as_str())?;
                let manager = client.get_connection_manager().await?;
                Arc::new(RedisTokenBlocklist::new(
                    manager,
                    settings.blocklist.key_prefix.clone(),
                ))
            }
            other => return Err(anyhow::anyhow!("Unknown blocklist backend: {}", other)),
        };

        let claims: Arc<dyn ClaimsAugmenter> = match settings.auth.admin_policy.as_str() {
            "bootstrap" => Arc::new(BootstrapAdminClaims::new(UserId(
                settings.auth.admin_identity,
            ))),
            "role" => Arc::new(RoleLookupClaims::new(user_repo.clone())),
            other => return Err(anyhow::anyhow!("Unknown admin policy: {}", other)),
        };

        if settings.auth.secret_key.is_empty() {
            return Err(anyhow::anyhow!("auth.secret_key must not be empty"));
        }
        let token_codec: Arc<dyn TokenCodec> = Arc::new(JwtHs256Codec::new(JwtConfig {
            access_ttl: Duration::seconds(settings.auth.access_ttl_secs),
            refresh_ttl: Duration::seconds(settings.auth.refresh_ttl_secs),
            signing_key: settings.auth.secret_key.clone().into_bytes(),
        }));
        let hooks: Arc<dyn TokenLifecycleHooks> =
            Arc::new(BlocklistTokenHooks::new(blocklist.clone(), claims));
        let token_guard = Arc::new(TokenGuard::new(token_codec.clone(), hooks.clone()));

        let credential_hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2PasswordHasher);
        let auth_service: Arc<dyn AuthService> = Arc::new(RealAuthService::new(
            user_repo.clone(),
            credential_hasher,
            token_codec,
            hooks,
            blocklist,
            tx_manager.clone(),
        ));
        let user_service: Arc<dyn UserService> = Arc::new(RealUserService::new(user_repo));

        let store_service: Arc<dyn StoreService> = Arc::new(RealStoreService::new(
            store_repo.clone(),
            item_repo.clone(),
            tag_repo.clone(),
        ));
        let item_service: Arc<dyn ItemService> = Arc::new(RealItemService::new(
            item_repo.clone(),
            store_repo.clone(),
            tag_repo.clone(),
            tx_manager.clone(),
        ));
        let tag_service: Arc<dyn TagService> = Arc::new(RealTagService::new(
            tag_repo,
            store_repo,
            item_repo,
            tx_manager,
        ));

        info!(
            blocklist = %settings.blocklist.backend,
            admin_policy = %settings.auth.admin_policy,
            "server started"
        );

        Ok(Self {
            auth_service,
            user_service,
            store_service,
            item_service,
            tag_service,
            token_guard,
            pool,
        })
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");
        self.pool.close().await;
    }
}
