//! 사용자 계정 모델.
//!
//! 저장소에 기록되는 계정 레코드와, 응답 본문에 사용되는
//! 비밀번호 해시가 제거된 프로필 뷰를 정의합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;

/// 사용자 계정 레코드.
///
/// `password_hash`는 평문 비밀번호가 아닌 Argon2id PHC 해시 문자열입니다.
/// 이 구조체는 응답 본문에 직접 직렬화하지 않습니다. 클라이언트에
/// 반환할 때는 [`UserProfile`]로 변환하세요.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAccount {
    /// 계정 식별자
    pub id: Uuid,
    /// 정규화된 이메일 (소문자, 공백 제거, 유일)
    pub email: String,
    /// 비밀번호 해시 (PHC 형식)
    pub password_hash: String,
    /// 이름
    pub first_name: String,
    /// 성
    pub last_name: String,
    /// 역할
    pub role: Role,
    /// 활성 여부 (비활성 계정은 로그인 불가)
    pub is_active: bool,
    /// 생성 시각
    pub created_at: DateTime<Utc>,
    /// 마지막 수정 시각
    pub updated_at: DateTime<Utc>,
}

impl UserAccount {
    /// 비밀번호 해시를 제외한 프로필 뷰로 변환합니다.
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: self.role,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

/// 계정 생성에 필요한 필드.
///
/// `email`은 이미 [`normalize_email`]로 정규화되어 있어야 하고,
/// `password_hash`는 이미 해싱되어 있어야 합니다. 평문 비밀번호는
/// 이 구조체를 통과하지 않습니다.
#[derive(Debug, Clone)]
pub struct NewUserAccount {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// 클라이언트에 노출되는 사용자 프로필.
///
/// 비밀번호 해시가 구조적으로 존재하지 않으므로 응답 직렬화 시
/// 실수로 유출될 수 없습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// 계정 식별자
    pub id: Uuid,
    /// 이메일
    pub email: String,
    /// 이름
    pub first_name: String,
    /// 성
    pub last_name: String,
    /// 역할
    pub role: Role,
    /// 활성 여부
    pub is_active: bool,
    /// 생성 시각
    pub created_at: DateTime<Utc>,
}

/// 이메일 정규화.
///
/// 조회와 저장에 사용되는 표준 형태를 만듭니다. 소문자화와
/// 앞뒤 공백 제거만 수행하며, 형식 검증은 HTTP 계층의 몫입니다.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
