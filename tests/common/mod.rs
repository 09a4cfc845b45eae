#![allow(dead_code)]

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Value, json};
use std::convert::Infallible;
use std::sync::Arc;
use stores_api::api;
use stores_api::server::Server;
use stores_api::settings::*;
use warp::Filter;

pub const SECRET: &str = "test-secret";

pub fn settings() -> Settings {
    Settings {
        auth: Auth {
            secret_key: SECRET.to_string(),
            access_ttl_secs: 900,
            refresh_ttl_secs: 3600,
            admin_policy: "bootstrap".to_string(),
            admin_identity: 1,
        },
        blocklist: Blocklist {
            backend: "memory".to_string(),
            redis_url: String::new(),
            key_prefix: "test".to_string(),
        },
        database: Database {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        http: Http {
            address: "127.0.0.1:0".to_string(),
            cert_path: None,
            key_path: None,
        },
        log: Log {
            filter: "debug".to_string(),
        },
    }
}

pub async fn app_with(
    settings: Settings,
) -> impl Filter<Extract = (impl warp::Reply,), Error = Infallible> + Clone + 'static {
    let server = Arc::new(Server::try_new(&settings).await.expect("server starts"));
    api::v1::routes(server).recover(api::v1::recover_error)
}

pub async fn app() -> impl Filter<Extract = (impl warp::Reply,), Error = Infallible> + Clone + 'static
{
    app_with(settings()).await
}

/// Sends a request and returns the status and parsed JSON body.
pub async fn call<F>(
    app: &F,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (u16, Value)
where
    F: Filter + 'static,
    F::Extract: warp::Reply + Send,
{
    let mut request = warp::test::request().method(method).path(path);
    if let Some(token) = token {
        request = request.header("authorization", format!("Bearer {token}"));
    }
    if let Some(body) = body {
        request = request.json(&body);
    }
    let response = request.reply(app).await;
    let status = response.status().as_u16();
    let json = if response.body().is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(response.body()).expect("json body")
    };
    (status, json)
}

pub async fn register<F>(app: &F, username: &str, password: &str)
where
    F: Filter + 'static,
    F::Extract: warp::Reply + Send,
{
    let (status, body) = call(
        app,
        "POST",
        "/register",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, 201, "register {username}: {body}");
}

/// Logs in and returns `(access_token, refresh_token)`.
pub async fn login<F>(app: &F, username: &str, password: &str) -> (String, String)
where
    F: Filter + 'static,
    F::Extract: warp::Reply + Send,
{
    let (status, body) = call(
        app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, 200, "login {username}: {body}");
    (
        body["access_token"].as_str().unwrap().to_string(),
        body["refresh_token"].as_str().unwrap().to_string(),
    )
}

pub fn claims_of(token: &str) -> Value {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    jsonwebtoken::decode::<Value>(
        token,
        &DecodingKey::from_secret(SECRET.as_bytes()),
        &validation,
    )
    .expect("token decodes")
    .claims
}

/// Signs an access token by hand, for states the API never hands out.
pub fn mint_access(secret: &str, sub: &str, jti: &str, fresh: bool, expires_in: Duration) -> String {
    let now = Utc::now();
    let claims = json!({
        "sub": sub,
        "jti": jti,
        "type": "access",
        "fresh": fresh,
        "iat": now.timestamp(),
        "nbf": now.timestamp(),
        "exp": (now + expires_in).timestamp(),
        "is_admin": false,
    });
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token encodes")
}
