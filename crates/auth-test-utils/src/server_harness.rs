//! Test server harness for E2E testing
//!
//! Provides `TestAuthServer` for spawning real authentication server
//! instances in tests, backed by an in-memory credential store with fixed
//! seeded accounts.

use anyhow::Context;
use auth_service::config::{Config, MIN_BCRYPT_COST};
use auth_service::credentials::{InMemoryCredentialStore, Role};
use auth_service::handlers::auth_handler::AppState;
use auth_service::routes;
use auth_service::services::security_service::SecurityService;
use base64::{engine::general_purpose, Engine as _};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Active trainee account present in every test server.
pub const TRAINEE_USERNAME: &str = "john.smith";
pub const TRAINEE_PASSWORD: &str = "Abc123";

/// Active trainer account present in every test server.
pub const TRAINER_USERNAME: &str = "coach.anna";
pub const TRAINER_PASSWORD: &str = "Xyz789";

/// Deactivated account; correct password must still fail to authenticate.
pub const INACTIVE_USERNAME: &str = "old.member";
pub const INACTIVE_PASSWORD: &str = "Old123";

/// Fixed base64-encoded signing secret for reproducible tests.
pub fn test_secret_key_base64() -> String {
    general_purpose::STANDARD.encode([7u8; 32])
}

/// Knobs a test can turn without rebuilding the harness.
#[derive(Debug, Clone)]
pub struct TestServerOptions {
    pub max_login_attempts: u32,
    pub lockout_minutes: i64,
    pub token_expiration_minutes: i64,
}

impl Default for TestServerOptions {
    fn default() -> Self {
        Self {
            max_login_attempts: 3,
            lockout_minutes: 5,
            token_expiration_minutes: 60,
        }
    }
}

/// Test harness for spawning the authentication server in E2E tests.
///
/// The server binds to a random available port and runs in the background
/// for the lifetime of the harness.
pub struct TestAuthServer {
    addr: SocketAddr,
    client: reqwest::Client,
    _handle: JoinHandle<()>,
}

impl TestAuthServer {
    /// Spawn a test server with default options and seeded accounts.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with(TestServerOptions::default()).await
    }

    /// Spawn a test server with custom lockout and expiration settings.
    pub async fn spawn_with(options: TestServerOptions) -> Result<Self, anyhow::Error> {
        let vars = HashMap::from([
            ("GYM_AUTH_SECRET_KEY".to_string(), test_secret_key_base64()),
            (
                "GYM_AUTH_MAX_LOGIN_ATTEMPTS".to_string(),
                options.max_login_attempts.to_string(),
            ),
            (
                "GYM_AUTH_LOCKOUT_MINUTES".to_string(),
                options.lockout_minutes.to_string(),
            ),
            (
                "GYM_AUTH_TOKEN_EXPIRATION_MINUTES".to_string(),
                options.token_expiration_minutes.to_string(),
            ),
            // Minimum cost keeps bcrypt fast in tests.
            (
                "GYM_AUTH_BCRYPT_COST".to_string(),
                MIN_BCRYPT_COST.to_string(),
            ),
        ]);
        let config = Config::from_vars(&vars).context("Failed to build test config")?;

        let store = InMemoryCredentialStore::new();
        store
            .insert_user(
                TRAINEE_USERNAME,
                TRAINEE_PASSWORD,
                Role::Trainee,
                true,
                MIN_BCRYPT_COST,
            )
            .map_err(|e| anyhow::anyhow!("Failed to seed trainee: {}", e))?;
        store
            .insert_user(
                TRAINER_USERNAME,
                TRAINER_PASSWORD,
                Role::Trainer,
                true,
                MIN_BCRYPT_COST,
            )
            .map_err(|e| anyhow::anyhow!("Failed to seed trainer: {}", e))?;
        store
            .insert_user(
                INACTIVE_USERNAME,
                INACTIVE_PASSWORD,
                Role::Trainee,
                false,
                MIN_BCRYPT_COST,
            )
            .map_err(|e| anyhow::anyhow!("Failed to seed inactive account: {}", e))?;

        let security = Arc::new(SecurityService::new(&config, Arc::new(store)));
        let state = Arc::new(AppState { security });
        let app = routes::build_routes(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind test server")?;
        let addr = listener
            .local_addr()
            .context("Failed to get local address")?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            client: reqwest::Client::new(),
            _handle: handle,
        })
    }

    /// Base URL of the test server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// POST /api/v1/auth/login with the given credentials, returning the raw
    /// response.
    pub async fn login_response(
        &self,
        username: &str,
        password: &str,
    ) -> Result<reqwest::Response, anyhow::Error> {
        self.client
            .post(format!("{}/api/v1/auth/login", self.url()))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .context("Login request failed")
    }

    /// Log in and return the issued token string; fails the test path if the
    /// server does not answer 201 with a token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, anyhow::Error> {
        let response = self.login_response(username, password).await?;
        let status = response.status();
        anyhow::ensure!(status == 201, "Expected 201 Created, got {}", status);

        let body: serde_json::Value = response.json().await.context("Login body not JSON")?;
        body.get("token")
            .and_then(|t| t.as_str())
            .map(|t| t.to_string())
            .context("Login response missing token field")
    }

    /// POST /api/v1/auth/logout with a bearer token.
    pub async fn logout(&self, token: &str) -> Result<reqwest::Response, anyhow::Error> {
        self.client
            .post(format!("{}/api/v1/auth/logout", self.url()))
            .bearer_auth(token)
            .send()
            .await
            .context("Logout request failed")
    }

    /// GET /api/v1/me with a bearer token.
    pub async fn get_me(&self, token: &str) -> Result<reqwest::Response, anyhow::Error> {
        self.client
            .get(format!("{}/api/v1/me", self.url()))
            .bearer_auth(token)
            .send()
            .await
            .context("Me request failed")
    }
}
