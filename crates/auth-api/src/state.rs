//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 시작 시 한 번 구성되는 읽기 전용 리소스의 묶음입니다.
//! Arc로 래핑되어 여러 요청 간에 안전하게 공유되며, 요청 처리 중
//! 변경되는 필드가 없으므로 잠금이 필요 없습니다.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use auth_core::UserRepository;

use crate::auth::TokenCodec;

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
pub struct AppState {
    /// 사용자 저장소 - 계정 조회/생성 (유일한 I/O 경계)
    pub repo: Arc<dyn UserRepository>,

    /// 토큰 코덱 - 서명 키와 claim 스키마 소유
    pub codec: TokenCodec,

    /// 데이터베이스 연결 풀 (헬스 체크용, 테스트에서는 없음)
    pub db_pool: Option<PgPool>,

    /// 서버 시작 시각 (업타임 계산용)
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// 새 상태 생성.
    pub fn new(repo: Arc<dyn UserRepository>, codec: TokenCodec) -> Self {
        Self {
            repo,
            codec,
            db_pool: None,
            started_at: Utc::now(),
        }
    }

    /// 헬스 체크에 사용할 연결 풀을 연결합니다.
    #[must_use]
    pub fn with_db_pool(mut self, pool: PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

/// 테스트용 상태 생성.
///
/// 인메모리 저장소와 개발용 시크릿 기반 코덱을 사용합니다.
/// 데이터베이스 없이 라우터 전체를 구동할 수 있습니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use auth_core::TokenConfig;

    use crate::repository::InMemoryUserRepository;

    let codec = TokenCodec::new(&TokenConfig::default())
        .expect("default token config must produce a codec");

    AppState::new(Arc::new(InMemoryUserRepository::new()), codec)
}
