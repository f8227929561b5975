//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `POST /api/auth/register` - 가입
//! - `POST /api/auth/login` - 로그인
//! - `GET /api/auth/profile` - 내 프로필 (인증 필요)
//! - `GET /api/auth/verify` - 토큰 유효성 확인 (인증 필요)
//! - `GET /api/auth/users` - 전체 계정 목록 (관리자 전용)

pub mod auth;
pub mod health;

use std::sync::Arc;

use axum::{Extension, Router};

use crate::state::AppState;

pub use auth::{auth_router, AuthData, LoginRequest, ProfileData, RegisterRequest, UsersData, VerifyData};
pub use health::{health_router, ComponentStatus, HealthResponse};

/// 전체 API 라우터 생성.
///
/// 토큰 코덱을 Extension으로 주입해 인증 추출기가 어떤 라우트에서든
/// 동일한 코덱을 사용하게 합니다. CORS/타임아웃 등 전송 계층
/// 레이어는 main에서 추가합니다.
pub fn create_api_router(state: Arc<AppState>) -> Router {
    let codec = state.codec.clone();

    Router::new()
        .merge(health_router(state.clone()))
        .nest("/api/auth", auth_router(state))
        .layer(Extension(codec))
}
