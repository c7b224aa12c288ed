#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use todo_collab_api::auth::JwtUtil;
use todo_collab_api::config::AppConfig;
use todo_collab_api::database::MemoryStore;
use todo_collab_api::services::FixedWeatherProvider;
use todo_collab_api::{app, AppState, Gateways};

pub const WEATHER: &str = "Sunny";
pub const PASSWORD: &str = "Password1";

/// An in-process server on an ephemeral port, backed by a fresh in-memory store
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    pub jwt: JwtUtil,
    pub store: Arc<MemoryStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let mut config = AppConfig::development();
        config.security.bcrypt_cost = 4;
        config.security.enable_cors = false;

        let store = Arc::new(MemoryStore::new());
        let weather = Arc::new(FixedWeatherProvider(WEATHER.to_string()));
        let state = AppState::new(&config, Gateways::memory(&store), weather, None)?;
        let router = app(state, &config);

        let listener = TcpListener::bind("127.0.0.1:0").await.context("failed to bind test listener")?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            client: reqwest::Client::new(),
            jwt: JwtUtil::new(&config.security.jwt_secret, config.security.jwt_expiry_minutes)?,
            store,
        })
    }

    pub async fn request(&self, method: Method, path: &str, token: Option<&str>, body: Option<Value>) -> Result<TestResponse> {
        let mut request = self.client.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = token {
            request = request.header("Authorization", token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body = if text.is_empty() { Value::Null } else { serde_json::from_str(&text)? };

        Ok(TestResponse { status, body })
    }

    pub async fn get(&self, path: &str, token: &str) -> Result<TestResponse> {
        self.request(Method::GET, path, Some(token), None).await
    }

    pub async fn post(&self, path: &str, token: &str, body: Value) -> Result<TestResponse> {
        self.request(Method::POST, path, Some(token), Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: &str) -> Result<TestResponse> {
        self.request(Method::DELETE, path, Some(token), None).await
    }

    /// Sign up and return `(user_id, bearer_token)`
    pub async fn signup(&self, email: &str, role: &str) -> Result<(i64, String)> {
        let response = self
            .request(
                Method::POST,
                "/auth/signup",
                None,
                Some(json!({ "email": email, "password": PASSWORD, "userRole": role })),
            )
            .await?;
        anyhow::ensure!(response.status == StatusCode::OK, "signup failed: {}", response.body);

        let token = response.data()["bearerToken"]
            .as_str()
            .context("missing bearerToken")?
            .to_string();
        let user_id = self.jwt.get_user_id(JwtUtil::substring_token(&token)?)?;
        Ok((user_id, token))
    }

    /// Create a todo as the token's user and return its id
    pub async fn create_todo(&self, token: &str, title: &str) -> Result<i64> {
        let response = self.post("/todos", token, json!({ "title": title, "contents": "contents" })).await?;
        anyhow::ensure!(response.status == StatusCode::OK, "todo creation failed: {}", response.body);
        response.data()["id"].as_i64().context("missing todo id")
    }
}
