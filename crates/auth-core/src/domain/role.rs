//! 역할 기반 접근 제어 (RBAC).
//!
//! 사용자 역할 정의.

use serde::{Deserialize, Serialize};

/// 사용자 역할.
///
/// 닫힌 2값 열거형입니다. 토큰 페이로드의 역할 문자열이 이 두 값에
/// 속하지 않으면 역직렬화가 실패하고, 토큰 검증 단계에서 거부됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 관리자 - 계정 조회 등 관리 작업 권한 보유
    Admin,
    /// 일반 사용자 - 자신의 프로필 접근만 가능
    User,
}

impl Role {
    /// 문자열에서 역할 파싱.
    ///
    /// 알 수 없는 값은 `None`을 반환합니다. 기본값으로 대체하지 않습니다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }

    /// 저장소에 기록되는 표준 문자열 표현.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl Default for Role {
    /// 가입 시 역할을 지정하지 않으면 일반 사용자입니다.
    fn default() -> Self {
        Role::User
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
