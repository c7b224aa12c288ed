use anyhow::Context;
use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::{JwtUtil, PasswordEncoder};
use crate::config::{AppConfig, StorageBackend};
use crate::database::{
    CommentRepository, DatabaseManager, ManagerRepository, MemoryStore, PgCommentRepository, PgManagerRepository,
    PgTodoRepository, PgUserRepository, TodoRepository, UserRepository,
};
use crate::services::{
    AuthService, CommentService, FixedWeatherProvider, HttpWeatherProvider, ManagerService, TodoService,
    UserService, WeatherProvider,
};

/// The four persistence gateways, backed by one store
#[derive(Clone)]
pub struct Gateways {
    pub users: Arc<dyn UserRepository>,
    pub todos: Arc<dyn TodoRepository>,
    pub managers: Arc<dyn ManagerRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl Gateways {
    pub fn memory(store: &Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            todos: store.clone(),
            managers: store.clone(),
            comments: store.clone(),
        }
    }

    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            todos: Arc::new(PgTodoRepository::new(pool.clone())),
            managers: Arc::new(PgManagerRepository::new(pool.clone())),
            comments: Arc::new(PgCommentRepository::new(pool.clone())),
        }
    }
}

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub jwt: Arc<JwtUtil>,
    pub auth: AuthService,
    pub users: UserService,
    pub todos: TodoService,
    pub managers: ManagerService,
    pub comments: CommentService,
    /// Present only with Postgres storage; used by `/health`
    pub pool: Option<PgPool>,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        gateways: Gateways,
        weather: Arc<dyn WeatherProvider>,
        pool: Option<PgPool>,
    ) -> anyhow::Result<Self> {
        let jwt = Arc::new(
            JwtUtil::new(&config.security.jwt_secret, config.security.jwt_expiry_minutes)
                .context("JWT_SECRET must be set")?,
        );
        let encoder = PasswordEncoder::new(config.security.bcrypt_cost);

        Ok(Self {
            auth: AuthService::new(gateways.users.clone(), jwt.clone(), encoder),
            users: UserService::new(gateways.users.clone(), encoder),
            todos: TodoService::new(gateways.todos.clone(), weather),
            managers: ManagerService::new(gateways.managers, gateways.users, gateways.todos.clone()),
            comments: CommentService::new(gateways.comments, gateways.todos),
            jwt,
            pool,
        })
    }

    /// Wire storage and weather from configuration, connecting and migrating Postgres when selected
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let weather: Arc<dyn WeatherProvider> = match &config.weather.fixed {
            Some(fixed) => Arc::new(FixedWeatherProvider(fixed.clone())),
            None => Arc::new(HttpWeatherProvider::new(config.weather.api_url.clone())),
        };

        match config.database.storage {
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on shutdown");
                let store = Arc::new(MemoryStore::new());
                Self::new(config, Gateways::memory(&store), weather, None)
            }
            StorageBackend::Postgres => {
                let pool = DatabaseManager::connect(&config.database)
                    .await
                    .context("failed to connect to Postgres")?;
                DatabaseManager::migrate(&pool).await.context("failed to run migrations")?;
                Self::new(config, Gateways::postgres(&pool), weather, Some(pool))
            }
        }
    }
}
