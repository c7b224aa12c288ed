use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    middleware::from_fn_with_state,
    response::{IntoResponse, Json},
    routing::{delete, get, patch, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::database::DatabaseManager;
use crate::handlers::{elevated, protected, public};
use crate::middleware::{admin_gate_middleware, jwt_auth_middleware};
use crate::state::AppState;

/// Build the full router for the given state
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Protected
        .merge(protected_routes(&state))
        // Elevated
        .merge(admin_routes(&state));

    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    if let Some(cors) = cors_layer(&config.security) {
        router = router.layer(cors);
    }

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(public::auth::signup))
        .route("/auth/signin", post(public::auth::signin))
}

fn protected_routes(state: &AppState) -> Router<AppState> {
    use protected::{comment, manager, todo, user};

    Router::new()
        .route("/todos", post(todo::save).get(todo::list))
        .route("/todos/:todo_id", get(todo::get))
        .route("/todos/:todo_id/managers", post(manager::save).get(manager::list))
        .route("/todos/:todo_id/managers/:manager_id", delete(manager::delete))
        .route("/todos/:todo_id/comments", post(comment::save).get(comment::list))
        .route("/users/:user_id", get(user::get))
        .route("/users", put(user::change_password))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware))
}

/// The admin gate is the outer layer, so it decides before JWT auth runs
fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/users/:user_id", patch(elevated::user::change_role))
        .route("/admin/comments/:comment_id", delete(elevated::comment::delete))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware))
        .route_layer(from_fn_with_state(state.clone(), admin_gate_middleware))
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }

    if security.cors_origins.iter().any(|origin| origin == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    )
}

async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Todo Collab API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "auth": "/auth/signup, /auth/signin (public)",
                "todos": "/todos[/:todoId] (protected)",
                "managers": "/todos/:todoId/managers[/:managerId] (protected)",
                "comments": "/todos/:todoId/comments (protected)",
                "users": "/users[/:userId] (protected)",
                "admin": "/admin/users/:userId, /admin/comments/:commentId (admin)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let Some(pool) = state.pool.as_ref() else {
        return (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "database": "memory" }
            })),
        );
    };

    match DatabaseManager::health_check(pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "database": "ok" }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": { "status": "degraded", "timestamp": now }
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use axum::response::Response;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::database::MemoryStore;
    use crate::error::ErrorClass;
    use crate::services::FixedWeatherProvider;
    use crate::state::Gateways;
    use crate::types::UserRole;

    fn router() -> (Router, AppState) {
        let mut config = AppConfig::development();
        config.security.bcrypt_cost = 4;
        config.security.enable_cors = false;

        let store = Arc::new(MemoryStore::new());
        let weather = Arc::new(FixedWeatherProvider("Sunny".into()));
        let state = AppState::new(&config, Gateways::memory(&store), weather, None).unwrap();
        (app(state.clone(), &config), state)
    }

    async fn send(router: Router, method: Method, uri: &str, token: Option<&str>, body: Body) -> Response {
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, token);
        }
        router.oneshot(request.body(body).unwrap()).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn admin_route_without_token_is_unauthorized() {
        let (router, _) = router();
        let response = send(router, Method::DELETE, "/admin/comments/1", None, Body::empty()).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.extensions().get::<ErrorClass>(), Some(&ErrorClass("Unauthorized")));
        let body = json_body(response).await;
        assert_eq!(body["message"], "Missing or Invalid Token");
    }

    #[tokio::test]
    async fn admin_route_with_user_token_is_forbidden() {
        let (router, state) = router();
        let token = state.jwt.create_token(1, "a@a.com", UserRole::User).unwrap();
        let response = send(router, Method::DELETE, "/admin/comments/1", Some(&token), Body::empty()).await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Admin Role Required");
    }

    #[tokio::test]
    async fn admin_handler_error_class_passes_through_gate() {
        let (router, state) = router();
        let token = state.jwt.create_token(7, "root@a.com", UserRole::Admin).unwrap();
        let response = send(router, Method::DELETE, "/admin/comments/999", Some(&token), Body::empty()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.extensions().get::<ErrorClass>(), Some(&ErrorClass("InvalidRequest")));
        let body = json_body(response).await;
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "Comment not found");
    }

    #[tokio::test]
    async fn malformed_json_body_gets_error_body() {
        let (router, _) = router();
        let response = send(router, Method::POST, "/auth/signup", None, Body::from("{not json")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], true);
        assert_eq!(body["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn health_reports_memory_store() {
        let (router, _) = router();
        let response = send(router, Method::GET, "/health", None, Body::empty()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["data"]["database"], "memory");
    }
}
