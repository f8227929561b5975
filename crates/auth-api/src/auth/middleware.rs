//! Axum용 JWT 인증 미들웨어.
//!
//! Axum 핸들러에서 사용할 인증 추출기와 역할 게이트를 제공합니다.
//!
//! 상태 코드 계약: 토큰이 아예 없거나 Bearer 형식이 아니면 401,
//! 토큰이 있으나 만료/무효이면 403입니다. 이 구분은 의도된 계약이며
//! 테스트가 두 코드를 모두 검증합니다.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use auth_core::Role;

use super::jwt::{Claims, TokenCodec, TokenError};

/// JWT 인증 추출기.
///
/// `Authorization: Bearer <token>` 헤더를 추출해 [`TokenCodec`]으로
/// 검증하고, 성공하면 확인된 claim을 핸들러에 값으로 전달합니다.
/// 요청 객체를 변경하지 않으며 요청 간 상태를 갖지 않습니다.
#[derive(Debug, Clone)]
pub struct JwtAuth(pub Claims);

/// 인증/인가 에러.
///
/// 메시지는 클라이언트에 그대로 전달되는 계약 문자열입니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JwtAuthError {
    /// Authorization 헤더 없음
    #[error("Access token required")]
    MissingToken,
    /// Bearer 형식이 아닌 헤더
    #[error("Access token required")]
    InvalidAuthHeader,
    /// 만료된 토큰
    #[error("Token expired")]
    TokenExpired,
    /// 서명/구조/claim 불일치
    #[error("Invalid token")]
    InvalidToken,
    /// 그 외 검증 실패
    #[error("Token verification failed")]
    VerificationFailed,
    /// 인증 없이 역할 게이트에 도달
    #[error("Authentication required")]
    AuthenticationRequired,
    /// 역할 부족
    #[error("Access denied. Required role: {}", join_roles(.required))]
    InsufficientRole {
        /// 허용되는 역할 집합
        required: Vec<Role>,
    },
    /// 코덱이 라우터에 연결되지 않음 (배선 오류)
    #[error("Internal server error")]
    CodecUnavailable,
}

fn join_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::to_string)
        .collect::<Vec<_>>()
        .join(" or ")
}

impl JwtAuthError {
    /// 에러에 대응하는 HTTP 상태 코드.
    pub fn status(&self) -> StatusCode {
        match self {
            JwtAuthError::MissingToken
            | JwtAuthError::InvalidAuthHeader
            | JwtAuthError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            JwtAuthError::TokenExpired
            | JwtAuthError::InvalidToken
            | JwtAuthError::VerificationFailed
            | JwtAuthError::InsufficientRole { .. } => StatusCode::FORBIDDEN,
            JwtAuthError::CodecUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TokenError> for JwtAuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => JwtAuthError::TokenExpired,
            TokenError::Invalid => JwtAuthError::InvalidToken,
            TokenError::Verification | TokenError::Encoding(_) => {
                JwtAuthError::VerificationFailed
            }
        }
    }
}

impl IntoResponse for JwtAuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "message": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}

impl<S> FromRequestParts<S> for JwtAuth
where
    S: Send + Sync,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Authorization 헤더에서 토큰 추출
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(JwtAuthError::MissingToken)?;

        // Bearer 토큰 형식 확인
        let token = auth_header
            .strip_prefix("Bearer ")
            .filter(|t| !t.is_empty())
            .ok_or(JwtAuthError::InvalidAuthHeader)?;

        // 라우터 구성 시 Extension으로 주입된 코덱
        let codec = parts
            .extensions
            .get::<TokenCodec>()
            .ok_or(JwtAuthError::CodecUnavailable)?;

        let claims = codec.verify(token)?;

        Ok(JwtAuth(claims))
    }
}

/// 역할 게이트.
///
/// 이미 확인된 claim에 대한 순수 술어입니다. I/O가 없으며 아래 두
/// 거부 외의 실패 모드가 없습니다:
/// - claim이 없으면 401 (인증 파이프라인이 실행되지 않았거나 실패)
/// - 역할이 허용 집합에 없으면 403
pub fn require_role(required: &[Role], claims: Option<&Claims>) -> Result<(), JwtAuthError> {
    let claims = claims.ok_or(JwtAuthError::AuthenticationRequired)?;

    if required.contains(&claims.role) {
        Ok(())
    } else {
        Err(JwtAuthError::InsufficientRole {
            required: required.to_vec(),
        })
    }
}

/// 관리자 역할을 요구하는 추출기.
#[derive(Debug, Clone)]
pub struct AdminAuth(pub Claims);

impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let JwtAuth(claims) = JwtAuth::from_request_parts(parts, state).await?;
        require_role(&[Role::Admin], Some(&claims))?;
        Ok(AdminAuth(claims))
    }
}
