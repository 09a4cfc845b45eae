use anyhow::{Result, anyhow};
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub auth: Auth,
    pub blocklist: Blocklist,
    pub database: Database,
    pub http: Http,
    pub log: Log,
}

#[derive(Clone, Deserialize)]
pub struct Auth {
    pub secret_key: String,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
    pub admin_policy: String, // "bootstrap" or "role"
    pub admin_identity: i64,
}

// Keeps the signing key out of logs.
impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("secret_key", &"<redacted>")
            .field("access_ttl_secs", &self.access_ttl_secs)
            .field("refresh_ttl_secs", &self.refresh_ttl_secs)
            .field("admin_policy", &self.admin_policy)
            .field("admin_identity", &self.admin_identity)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Blocklist {
    pub backend: String, // "memory" or "redis"
    pub redis_url: String,
    pub key_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Http {
    pub address: String,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub filter: String,
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::with_name(path))
        .add_source(Environment::with_prefix("STORES").separator("__"))
        .set_override_option("database.url", std::env::var("DATABASE_URL").ok())
        .map_err(|e| anyhow!(e))?
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_settings_parse() {
        let settings = parse_settings(Some("settings/dev.toml")).unwrap();
        assert_eq!(settings.blocklist.backend, "memory");
        assert_eq!(settings.auth.admin_policy, "bootstrap");
        assert!(settings.auth.access_ttl_secs > 0);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(parse_settings(Some("settings/does-not-exist.toml")).is_err());
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let settings = parse_settings(Some("settings/dev.toml")).unwrap();
        let printed = format!("{:?}", settings.auth);
        assert!(!printed.contains(&settings.auth.secret_key));
    }
}
