//! Test helpers for integration tests
//!
//! Provides a spawned test server, token minting and response assertions.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use atelier_api::{create_app, create_app_state};
use atelier_common::{
    AppConfig, AppSettings, CorsConfig, DatabaseConfig, Environment, JwtConfig, JwtService,
    RateLimitConfig, ServerConfig, SweeperConfig, UserRole,
};
use atelier_core::UserId;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    jwt: JwtService,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on an ephemeral port
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);

        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            jwt,
            handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Mint an access token for a regular user
    pub fn user_token(&self, user_id: UserId) -> Result<String> {
        Ok(self.jwt.issue_access_token(user_id, UserRole::User)?)
    }

    /// Mint an access token for a moderator
    pub fn admin_token(&self) -> Result<String> {
        Ok(self.jwt.issue_access_token(UserId::generate(), UserRole::Admin)?)
    }

    fn authed(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {token}"))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.authed(self.client.get(self.url(path)), token).send().await?)
    }

    /// Make a POST request with auth token and JSON body
    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .authed(self.client.post(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request with auth token and no body
    pub async fn post_empty(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.authed(self.client.post(self.url(path)), token).send().await?)
    }

    /// Make a PATCH request with auth token and JSON body
    pub async fn patch_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .authed(self.client.patch(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PATCH request with auth token and no body
    pub async fn patch_empty(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.authed(self.client.patch(self.url(path)), token).send().await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.authed(self.client.delete(self.url(path)), token).send().await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Build a configuration from DATABASE_URL and JWT_SECRET
///
/// The sweeper stays off; tests trigger sweeps explicitly where needed.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")?;
    let jwt_secret = std::env::var("JWT_SECRET")?;

    Ok(AppConfig {
        app: AppSettings {
            name: "atelier-integration".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: database_url,
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 5,
            run_migrations: true,
        },
        jwt: JwtConfig {
            secret: jwt_secret,
            access_token_expiry: 900,
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 1000,
            burst: 1000,
        },
        cors: CorsConfig::default(),
        sweeper: SweeperConfig {
            enabled: false,
            ..SweeperConfig::default()
        },
    })
}

/// Helper to check if test environment is available
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    for var in ["DATABASE_URL", "JWT_SECRET"] {
        if std::env::var(var).is_err() {
            eprintln!("Skipping test: {var} not set");
            return false;
        }
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
