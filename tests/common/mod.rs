use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use pwreset::config::Config;
use pwreset::email::ResetMailer;
use pwreset::state::SharedState;
use pwreset::tokens::{MemoryTokenStore, TokenStore};

/// A mail sent through the test mailer.
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub token: String,
    pub reset_url: String,
}

/// Records every send; fails all of them when `fail` is set.
#[derive(Default)]
pub struct TestMailer {
    pub fail: bool,
    pub sent: Mutex<Vec<SentMail>>,
}

impl TestMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResetMailer for TestMailer {
    async fn send_reset(&self, to_email: &str, token: &str, reset_url: &str) -> Result<(), String> {
        self.sent.lock().unwrap().push(SentMail {
            to: to_email.to_string(),
            token: token.to_string(),
            reset_url: reset_url.to_string(),
        });
        if self.fail {
            return Err("connection refused".to_string());
        }
        Ok(())
    }
}

/// A running test server instance.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: SharedState,
    pub store: Arc<MemoryTokenStore>,
    pub mailer: Option<Arc<TestMailer>>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a JSON body to the forgot-password endpoint.
    pub async fn forgot_password(&self, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/forgot-password"))
            .json(body)
            .send()
            .await
            .expect("forgot-password request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// GET the validation endpoint with a raw query string.
    pub async fn validate(&self, query: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(&format!("/api/validate-reset-token{query}")))
            .send()
            .await
            .expect("validate request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Request a reset for a fixed address and return the issued token.
    pub async fn issue_token(&self) -> String {
        let (body, status) = self
            .forgot_password(&json!({ "email": "a@b.com", "reset_url": "https://x/reset" }))
            .await;
        assert_eq!(status, StatusCode::OK, "forgot-password failed: {body}");
        body["reset_token"].as_str().unwrap().to_string()
    }
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        token_ttl: chrono::Duration::minutes(30),
        sweep_interval: std::time::Duration::from_secs(60),
        max_body_size: 65_536,
        frontend_port: 3000,
        log_level: "warn".to_string(),
        smtp: None,
    }
}

/// Spawn a test app backed by a working mailer.
pub async fn spawn_app() -> TestApp {
    spawn_with_mailer(Some(Arc::new(TestMailer::default()))).await
}

/// Spawn a test app with the given mailer (`None` = SMTP not configured).
pub async fn spawn_with_mailer(mailer: Option<Arc<TestMailer>>) -> TestApp {
    let config = test_config();
    let store = Arc::new(MemoryTokenStore::new(config.token_ttl));
    let tokens: Arc<dyn TokenStore> = store.clone();
    let reset_mailer = mailer.clone().map(|m| m as Arc<dyn ResetMailer>);

    let (app, state) = pwreset::build_app_with(config, tokens, reset_mailer);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        state,
        store,
        mailer,
    }
}
