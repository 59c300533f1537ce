use axum::{http::HeaderValue, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use taskify_api::config;
use taskify_api::database::manager::DatabaseManager;
use taskify_api::handlers;
use taskify_api::middleware::jwt_auth_middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Taskify API in {:?} mode", config.environment);

    // Migrations are best-effort at boot; /health reports a database that
    // never came up
    if let Err(e) = DatabaseManager::migrate().await {
        tracing::warn!("Skipping migrations at startup: {}", e);
    }

    let app = app();

    let port = config.server.port;
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Taskify API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        // Protected API
        .merge(api_routes())
        // Global middleware
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn auth_public_routes() -> Router {
    use axum::routing::post;
    use handlers::public::auth;

    Router::new()
        .route("/auth/register", post(auth::register_post))
        .route("/auth/login", post(auth::login_post))
}

fn api_routes() -> Router {
    use handlers::protected::{auth, projects, tasks};

    Router::new()
        .route("/api/auth/whoami", get(auth::whoami_get))
        .route("/api/tasks", get(tasks::tasks_get).post(tasks::tasks_post))
        .route(
            "/api/tasks/:id",
            get(tasks::task_get)
                .put(tasks::task_put)
                .delete(tasks::task_delete),
        )
        .route(
            "/api/projects",
            get(projects::projects_get).post(projects::projects_post),
        )
        .route(
            "/api/projects/:id",
            get(projects::project_get)
                .put(projects::project_put)
                .delete(projects::project_delete),
        )
        .route("/api/projects/:id/tasks", get(projects::project_tasks_get))
        .route_layer(axum::middleware::from_fn(jwt_auth_middleware))
}

fn cors_layer() -> CorsLayer {
    let origins = &config::config().security.cors_origins;
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Taskify API",
            "version": version,
            "description": "Personal task/project tracker backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/auth/register, /auth/login (public - token acquisition)",
                "whoami": "/api/auth/whoami (protected)",
                "tasks": "/api/tasks[/:id] (protected)",
                "projects": "/api/projects[/:id][/tasks] (protected)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
