//! 인증 서비스의 에러 타입.
//!
//! 이 모듈은 인증 서비스 전반에서 사용되는 에러 타입을 정의합니다.
//! 각 variant의 페이로드는 클라이언트에 노출 가능한 메시지이며,
//! 비밀번호 해시나 서명 키 등 비밀 정보를 절대 포함하지 않습니다.

use thiserror::Error;

/// 핵심 인증 에러.
#[derive(Debug, Error)]
pub enum AuthError {
    /// 잘못된 입력 (필수 필드 누락, 길이 미달 등)
    #[error("잘못된 입력: {0}")]
    Validation(String),

    /// 중복 충돌 (이미 존재하는 이메일 등)
    #[error("중복 충돌: {0}")]
    Conflict(String),

    /// 인증 실패 (잘못된 자격증명, 토큰 없음)
    #[error("인증 실패: {0}")]
    Unauthorized(String),

    /// 접근 거부 (비활성 계정, 유효하지 않은 토큰, 역할 부족)
    #[error("접근 거부: {0}")]
    Forbidden(String),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 데이터베이스 에러
    #[error("데이터베이스 에러: {0}")]
    Database(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 인증 작업을 위한 Result 타입.
pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// 호출자가 입력을 고쳐 재시도할 수 있는 에러인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::Validation(_)
                | AuthError::Conflict(_)
                | AuthError::Unauthorized(_)
                | AuthError::Forbidden(_)
                | AuthError::NotFound(_)
        )
    }

    /// 프로세스를 시작할 수 없는 치명적인 에러인지 확인합니다.
    ///
    /// 설정 에러만 치명적이며, 나머지는 요청 단위로 복구 가능합니다.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AuthError::Config(_))
    }
}
