//! 인증 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 가입/로그인/프로필/토큰 검증 및 헬스 체크 엔드포인트를 제공합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use auth_api::auth::TokenCodec;
use auth_api::openapi::swagger_ui_router;
use auth_api::repository::PostgresUserRepository;
use auth_api::routes::create_api_router;
use auth_api::state::AppState;
use auth_core::{init_logging, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일은 있으면 읽고 없으면 무시
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    init_logging(&config.logging).map_err(|e| anyhow::anyhow!("{e}"))?;

    if config.token.fallback_secret {
        warn!(
            "JWT_SECRET is not set; using the development-only fallback secret. \
             Set JWT_SECRET before running in production."
        );
    }

    // 코덱은 여기서 한 번 구성되고 이후 불변
    let codec = TokenCodec::new(&config.token)?;

    let database_url = config
        .database
        .url
        .clone()
        .context("DATABASE_URL must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.connection_timeout_secs))
        .connect(&database_url)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .context("failed to run database migrations")?;
    info!("Database migrations applied");

    let repo = Arc::new(PostgresUserRepository::new(pool.clone()));
    let state = Arc::new(AppState::new(repo, codec).with_db_pool(pool));

    // CORS: origin이 설정되어 있으면 그 origin만, 아니면 전체 허용
    let cors = match &config.server.cors_origin {
        Some(origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .context("invalid CORS_ORIGIN")?;
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = create_api_router(state)
        .merge(swagger_ui_router())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid API_HOST/API_PORT")?;

    info!(%addr, "Auth API server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("Health check at http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 종료합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
