//! 헬스 체크 endpoint.
//!
//! 서버 상태 확인을 위한 헬스 체크 엔드포인트를 제공합니다.
//! 로드밸런서나 오케스트레이션 시스템(Kubernetes 등)에서 사용됩니다.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// 헬스 체크 응답 구조체.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// 전체 서비스 상태 ("healthy" | "degraded")
    pub status: String,

    /// API 버전
    pub version: String,

    /// 서버 업타임(초)
    pub uptime_secs: i64,

    /// 현재 시간 (ISO 8601)
    pub timestamp: String,

    /// 데이터베이스 상태
    pub database: ComponentStatus,
}

/// 컴포넌트 상태.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentStatus {
    /// 상태 ("up" | "down" | "not_configured")
    pub status: String,

    /// 추가 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentStatus {
    /// 정상 상태.
    pub fn up() -> Self {
        Self {
            status: "up".to_string(),
            message: None,
        }
    }

    /// 비정상 상태.
    pub fn down(message: impl Into<String>) -> Self {
        Self {
            status: "down".to_string(),
            message: Some(message.into()),
        }
    }

    /// 미설정 상태.
    pub fn not_configured() -> Self {
        Self {
            status: "not_configured".to_string(),
            message: None,
        }
    }
}

/// 단순 liveness 확인.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "서버 동작 중"))
)]
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "message": "Auth service is running",
    }))
}

/// 상세 readiness 확인.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses((status = 200, description = "컴포넌트 상태 포함 응답", body = HealthResponse))
)]
pub async fn health_ready(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match &state.db_pool {
        Some(pool) => match sqlx::query("SELECT 1").execute(pool).await {
            Ok(_) => ComponentStatus::up(),
            Err(e) => ComponentStatus::down(e.to_string()),
        },
        None => ComponentStatus::not_configured(),
    };

    let status = if database.status == "down" {
        "degraded"
    } else {
        "healthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
        timestamp: Utc::now().to_rfc3339(),
        database,
    })
}

/// 헬스 체크 라우터 생성.
pub fn health_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(health_ready))
        .with_state(state)
}
