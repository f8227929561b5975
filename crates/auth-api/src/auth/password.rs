//! 비밀번호 해싱 유틸리티.
//!
//! Argon2id 기반 비밀번호 해싱 및 검증.
//!
//! 최소 길이 등 정책 검증은 HTTP 계층(요청 DTO)의 몫이며, 이 모듈은
//! 해싱과 비교만 담당합니다.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// 비밀번호 해싱 에러.
///
/// 해싱 프리미티브 자체의 실패는 요청 단위 에러가 아니라 설정
/// 수준의 문제입니다.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("비밀번호 해싱 실패")]
    HashingFailed,
}

/// 비밀번호 해싱.
///
/// Argon2id 알고리즘을 사용하며 솔트는 호출마다 새로 생성됩니다.
/// 결과는 솔트와 파라미터를 포함한 PHC 형식 문자열입니다.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| PasswordError::HashingFailed)?;

    Ok(hash.to_string())
}

/// 비밀번호 검증.
///
/// 저장된 해시와 입력된 비밀번호를 상수 시간으로 비교합니다.
/// 불일치뿐 아니라 해시가 PHC 형식이 아닌 경우에도 `false`를
/// 반환합니다. 어떤 입력에도 에러를 던지지 않습니다.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
