//! 인증 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (가입, 로그인, 프로필, 토큰 검증)
//! - JWT 토큰 발급/검증/디코딩
//! - Argon2id 비밀번호 해싱
//! - 역할 기반 접근 제어
//! - 헬스 체크 엔드포인트
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: 토큰 코덱, 비밀번호 해싱, 인증 추출기
//! - [`repository`]: 사용자 저장소 구현 (Postgres)
//! - [`error`]: HTTP 응답 봉투 및 에러 변환
//! - [`openapi`]: OpenAPI 문서 및 Swagger UI

pub mod auth;
pub mod error;
pub mod extract;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod state;

pub use auth::{
    hash_password, verify_password, AdminAuth, Claims, JwtAuth, JwtAuthError, PasswordError,
    TokenCodec, TokenError,
};
pub use error::{ApiError, ApiResponse, ApiResult};
pub use routes::create_api_router;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
