use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::{http::Method, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

mod config;
mod database;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;
mod state;

use config::AppConfig;
use database::connection::get_db_client;
use services::email_service::EmailService;
use services::ocr_service::OcrService;
use services::otp_service::OtpService;
use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::from_env();

    create_upload_dir(&config.upload_dir).await;

    let db = get_db_client(&config).await;
    let app_state = initialize_app_state(db, &config);

    let app = build_router(app_state);
    start_server(app, &config).await;
}

async fn create_upload_dir(upload_dir: &str) {
    if let Err(e) = tokio::fs::create_dir_all(upload_dir).await {
        tracing::warn!("Failed to create {}: {}", upload_dir, e);
    }
}

fn initialize_app_state(db: mongodb::Database, config: &AppConfig) -> AppState {
    let otp_service = OtpService::new(config.otp_ttl_minutes);

    let email_service = match EmailService::new(&config.smtp) {
        Ok(service) => {
            tracing::info!("✅ Email service initialized successfully");
            service
        }
        Err(e) => {
            tracing::error!("❌ Failed to initialize email service: {}", e);
            panic!("Failed to initialize email service: {}", e);
        }
    };

    let mut app_state = AppState::new(db, otp_service, email_service, config.upload_dir.clone());

    tracing::info!("🔧 Attempting to initialize OCR engine...");
    match OcrService::new(&config.ocr) {
        Ok(ocr_service) => {
            tracing::info!("✅ OCR engine initialized successfully");
            app_state = app_state.with_ocr(Arc::new(ocr_service));
        }
        Err(e) => {
            tracing::error!("❌ Failed to initialize OCR engine: {}", e);
            tracing::warn!("Image text extraction will be disabled");
        }
    }

    app_state
}

fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/api/health", get(api_health_check))
        .merge(routes::drugs::routes())
        .merge(routes::auth::routes())
        .merge(routes::upload::routes())
        .layer(cors)
        .with_state(app_state)
}

async fn start_server(app: Router, config: &AppConfig) {
    let host: std::net::IpAddr = config
        .host
        .parse()
        .unwrap_or_else(|_| [0, 0, 0, 0].into());
    let addr = SocketAddr::from((host, config.port));

    tracing::info!("🚀 Server starting on {}", addr);

    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            axum::serve(listener, app).await.unwrap();
        }
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    }
}

async fn root_handler() -> &'static str {
    "💊 Drug Interaction API"
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn api_health_check(State(state): State<AppState>) -> Json<Value> {
    use mongodb::bson::doc;

    let db_status = match state.db.run_command(doc! {"ping": 1}).await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };

    Json(json!({
        "status": "healthy",
        "database": db_status,
        "ocr": state.ocr_service.is_some(),
        "otp": true,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
