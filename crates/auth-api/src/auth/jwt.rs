//! JWT 토큰 처리.
//!
//! 토큰 발급/검증/디코딩을 담당하는 [`TokenCodec`]을 제공합니다.
//!
//! 코덱은 시작 시점에 [`TokenConfig`]로 한 번 구성되며 이후 불변입니다.
//! 전역 상태가 없으므로 테스트마다 서로 다른 시크릿으로 코덱을
//! 만들 수 있습니다.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use auth_core::{AuthResult, Role, TokenConfig};

/// JWT 페이로드.
///
/// 자격 증명 claim(sub/email/role)과 표준 시간/컨텍스트 claim을 포함합니다.
/// `role`은 닫힌 [`Role`] 열거형이므로, 페이로드에 알 수 없는 역할
/// 문자열이 들어 있으면 역직렬화가 실패하고 검증이 거부됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Subject - 계정 식별자 (계정마다 고정된 불투명 문자열)
    pub sub: String,
    /// 이메일 (표시용 보조 식별자, 권한 판단에 사용하지 않음)
    pub email: String,
    /// 역할
    pub role: Role,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
    /// 발급자
    pub iss: String,
    /// 수신자
    pub aud: String,
}

/// 토큰 처리 에러.
///
/// 검증 실패 사유를 호출자가 구분할 수 있도록 만료/무효/기타를
/// 별도 variant로 유지합니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// 만료된 토큰
    #[error("토큰이 만료되었습니다")]
    Expired,
    /// 서명/구조/발급자/수신자 불일치 또는 알 수 없는 역할
    #[error("유효하지 않은 토큰입니다")]
    Invalid,
    /// 그 외 디코딩 실패
    #[error("토큰 검증에 실패했습니다")]
    Verification,
    /// 인코딩 실패 (서명 키 구성 오류 등)
    #[error("토큰 인코딩 실패: {0}")]
    Encoding(String),
}

/// 토큰 발급/검증/디코딩 코덱.
///
/// 서명 키와 claim 스키마의 유일한 소유자입니다. 요청 간에 공유되는
/// 불변 값이며 내부 잠금이 없어 동시 호출에 안전합니다.
#[derive(Clone)]
pub struct TokenCodec {
    issuer: String,
    audience: String,
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenCodec {
    /// 설정에서 코덱을 생성합니다.
    ///
    /// # Errors
    ///
    /// 유효 기간 문자열이 파싱되지 않으면 `AuthError::Config`를
    /// 반환합니다. 이는 시작 시점의 치명적 설정 오류입니다.
    pub fn new(config: &TokenConfig) -> AuthResult<Self> {
        let ttl = config.ttl()?;
        let secret = config.secret.expose_secret().as_bytes();

        Ok(Self {
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        })
    }

    /// 토큰 발급.
    ///
    /// 현재 시각을 발급 시점으로 사용합니다. 만료는 발급 시점 + 유효
    /// 기간이며, 발급자/수신자는 코덱 구성 값으로 고정됩니다.
    pub fn issue(&self, sub: &str, email: &str, role: Role) -> Result<String, TokenError> {
        self.issue_at(sub, email, role, Utc::now())
    }

    /// 지정한 발급 시점으로 토큰 발급.
    ///
    /// 만료 시나리오를 시뮬레이션하는 테스트에서 과거 시점을 넘겨
    /// 사용합니다.
    pub fn issue_at(
        &self,
        sub: &str,
        email: &str,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: sub.to_string(),
            email: email.to_string(),
            role,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// 토큰 검증.
    ///
    /// 구조, 서명, 발급자, 수신자, 만료를 모두 확인합니다.
    /// 실패 시 절대 부분적으로 신뢰된 claim을 반환하지 않습니다.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidToken
                | ErrorKind::InvalidSignature
                | ErrorKind::InvalidIssuer
                | ErrorKind::InvalidAudience
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => TokenError::Invalid,
                _ => TokenError::Verification,
            })
    }

    /// 서명/만료 확인 없이 claim 추출.
    ///
    /// 로깅 등 비권위적 조회 전용입니다. 서명을 확인하지 않으므로
    /// 이 결과로 접근 제어를 판단해서는 안 됩니다. 잘못된 입력에는
    /// `None`을 반환합니다.
    pub fn decode(token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .ok()
            .map(|data| data.claims)
    }
}
