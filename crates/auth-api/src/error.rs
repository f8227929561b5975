//! 통합 API 응답/에러 타입.
//!
//! 모든 엔드포인트는 `{success, message, data?, error?}` 형태의 봉투를
//! 반환합니다. 에러 변환 시 내부 라이브러리의 에러 문자열은 디버그
//! 빌드에서만 `error` 필드로 노출되고, 릴리스 빌드에서는 숨겨집니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use auth_core::AuthError;

/// 성공 응답 봉투.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// 성공 여부 (성공 응답에서는 항상 true)
    pub success: bool,
    /// 사람이 읽을 수 있는 메시지
    pub message: String,
    /// 응답 데이터
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 데이터가 포함된 성공 봉투 생성.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// API 에러.
///
/// variant별 HTTP 상태 코드 매핑:
///
/// | variant        | status |
/// |----------------|--------|
/// | `Validation`   | 400    |
/// | `Unauthorized` | 401    |
/// | `Forbidden`    | 403    |
/// | `NotFound`     | 404    |
/// | `Conflict`     | 409    |
/// | `Internal`     | 500    |
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    /// 내부 에러. 페이로드는 로그/디버그 전용이며 클라이언트
    /// 메시지는 항상 고정 문구입니다.
    #[error("Internal server error")]
    Internal(String),
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 에러에 대응하는 HTTP 상태 코드.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(m) => ApiError::Validation(m),
            AuthError::Conflict(m) => ApiError::Conflict(m),
            AuthError::Unauthorized(m) => ApiError::Unauthorized(m),
            AuthError::Forbidden(m) => ApiError::Forbidden(m),
            AuthError::NotFound(m) => ApiError::NotFound(m),
            AuthError::Database(m) | AuthError::Config(m) | AuthError::Internal(m) => {
                ApiError::Internal(m)
            }
        }
    }
}

/// 에러 응답 본문.
#[derive(Debug, Serialize, Deserialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let detail = match &self {
            ApiError::Internal(detail) => {
                error!(%detail, "internal error while handling request");
                // 상세 내용은 디버그 빌드에서만 노출
                cfg!(debug_assertions).then(|| detail.clone())
            }
            _ => None,
        };

        let body = Json(ErrorBody {
            success: false,
            message: self.to_string(),
            error: detail,
        });

        (status, body).into_response()
    }
}
