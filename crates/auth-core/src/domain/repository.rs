//! 사용자 저장소 추상화.
//!
//! 영속 계층은 외부 협력자입니다. 이 trait 뒤에서 Postgres 구현과
//! 테스트용 인메모리 구현이 교체됩니다.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AuthResult;

use super::user::{NewUserAccount, UserAccount};

/// 사용자 계정 저장소.
///
/// 모든 조회는 정규화된 이메일([`super::normalize_email`])을 전제로 합니다.
/// 구현체는 요청 간 공유되므로 `Send + Sync`여야 하며, 내부적으로
/// 잠금을 오래 보유하지 않아야 합니다.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 정규화된 이메일로 계정 조회.
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<UserAccount>>;

    /// 식별자로 계정 조회.
    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<UserAccount>>;

    /// 계정 생성.
    ///
    /// 이메일이 이미 존재하면 `AuthError::Conflict`를 반환합니다.
    /// 유일성의 최종 보증은 저장소에 있습니다. 핸들러의 사전 조회는
    /// 친절한 에러 메시지를 위한 것일 뿐입니다.
    async fn create(&self, new_user: NewUserAccount) -> AuthResult<UserAccount>;

    /// 계정 갱신. 존재하지 않으면 `AuthError::NotFound`.
    async fn update(&self, user: UserAccount) -> AuthResult<UserAccount>;

    /// 전체 계정 목록 (관리자 전용 조회에 사용).
    async fn list(&self) -> AuthResult<Vec<UserAccount>>;
}
