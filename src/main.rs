use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use axum::response::IntoResponse;
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

mod api;
mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod services;

use auth::middleware as auth_gate;
use auth::roles;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = crate::config::config();
    tracing::info!("Starting clinic API in {:?} mode", config.environment);

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("CLINIC_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Clinic API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    let config = crate::config::config();

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .server
                .frontend_origin
                .parse::<HeaderValue>()
                .expect("FRONTEND_URL must be a valid origin"),
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        // Public
        .route("/health", get(health))
        // API routes; everything except login requires a bearer token
        .merge(auth_routes())
        .merge(dashboard_routes())
        .merge(patient_routes())
        .merge(service_routes())
        .merge(appointment_routes())
        .merge(invoice_routes())
        .merge(task_routes())
        .fallback(not_found)
        // Global middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// Last-resort conversion of a panicking handler into the generic 500
/// envelope; the panic payload goes to the log, never to the client.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    let detail = err
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| err.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    tracing::error!("Handler panicked: {}", detail);

    error::ApiError::Internal.into_response()
}

fn auth_routes() -> Router {
    use handlers::auth;

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route(
            "/api/auth/me",
            get(auth::me).route_layer(middleware::from_fn(auth_gate::require_auth)),
        )
}

fn dashboard_routes() -> Router {
    use handlers::dashboard;

    Router::new()
        .route("/api/dashboard/kpis", get(dashboard::kpis))
        .route("/api/dashboard/revenue-chart", get(dashboard::revenue_chart))
        .route(
            "/api/dashboard/appointment-chart",
            get(dashboard::appointment_chart),
        )
        .route_layer(middleware::from_fn(auth_gate::require_auth))
}

fn patient_routes() -> Router {
    use handlers::patients;

    Router::new()
        .route("/api/patients/", get(patients::list).post(patients::create))
        .route(
            "/api/patients/:id",
            get(patients::detail)
                .put(patients::update)
                .delete(patients::delete),
        )
        .route(
            "/api/patients/:id/medical-history",
            put(patients::update_medical_history).route_layer(middleware::from_fn(
                |req, next| auth_gate::require_role(roles::DOCTOR, req, next),
            )),
        )
        .route_layer(middleware::from_fn(auth_gate::require_auth))
}

fn service_routes() -> Router {
    use handlers::services;

    Router::new()
        .route("/api/services/", get(services::list).post(services::create))
        .route(
            "/api/services/:id",
            put(services::update).delete(services::delete),
        )
        .route_layer(middleware::from_fn(auth_gate::require_auth))
}

fn appointment_routes() -> Router {
    use handlers::appointments;

    Router::new()
        .route(
            "/api/appointments/",
            get(appointments::list).post(appointments::create),
        )
        .route(
            "/api/appointments/:id",
            put(appointments::update).delete(appointments::delete),
        )
        .route_layer(middleware::from_fn(auth_gate::require_auth))
}

fn invoice_routes() -> Router {
    use handlers::invoices;

    Router::new()
        .route("/api/invoices/", get(invoices::list).post(invoices::create))
        .route(
            "/api/invoices/:id",
            put(invoices::update).delete(invoices::delete),
        )
        .route("/api/invoices/:id/pay", post(invoices::mark_paid))
        .route_layer(middleware::from_fn(auth_gate::require_auth))
}

fn task_routes() -> Router {
    use handlers::tasks;

    Router::new()
        .route("/api/tasks/", get(tasks::list).post(tasks::create))
        .route("/api/tasks/:id", put(tasks::update).delete(tasks::delete))
        .route("/api/tasks/:id/status", put(tasks::update_status))
        .route_layer(middleware::from_fn(auth_gate::require_auth))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::manager::health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}

async fn not_found() -> error::ApiError {
    error::ApiError::not_found("לא נמצא")
}
