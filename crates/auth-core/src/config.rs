//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 설정은 시작 시 한 번 로드되며 이후 변경되지 않습니다.

use chrono::Duration;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AuthError, AuthResult};

/// 시크릿 미설정 시 사용되는 개발 전용 서명 키.
///
/// 운영 환경에서는 절대 사용하면 안 되며, 이 값으로 기동하면
/// 시작 시점에 경고가 출력됩니다.
pub const DEV_FALLBACK_SECRET: &str = "fallback-secret-for-dev-only";

/// 토큰 발급자 기본값.
pub const DEFAULT_ISSUER: &str = "perfume-ecommerce";

/// 토큰 수신자 기본값.
pub const DEFAULT_AUDIENCE: &str = "perfume-users";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 데이터베이스 설정
    pub database: DatabaseConfig,
    /// 토큰 서명 설정
    pub token: TokenConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 허용할 CORS origin (없으면 모든 origin 허용)
    #[serde(default)]
    pub cors_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            cors_origin: None,
        }
    }
}

impl ServerConfig {
    /// 환경 변수에서 설정 로드.
    pub fn from_env() -> Self {
        let host = std::env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);
        let cors_origin = std::env::var("CORS_ORIGIN").ok().filter(|s| !s.is_empty());

        Self {
            host,
            port,
            cors_origin,
        }
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// 연결 URL (미설정 시 서버 기동 불가)
    #[serde(default)]
    pub url: Option<String>,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 타임아웃 (초)
    pub connection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            connection_timeout_secs: 30,
        }
    }
}

impl DatabaseConfig {
    /// 환경 변수에서 설정 로드.
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Self {
            url,
            max_connections,
            ..Default::default()
        }
    }
}

/// 토큰 서명 설정.
///
/// 서명 비밀키는 [`SecretString`]으로 보관되어 Debug 출력이나
/// 로그에 값이 노출되지 않습니다.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    /// HMAC 서명 비밀키
    pub secret: SecretString,
    /// 토큰 유효 기간 문자열 (예: "7d", "12h", "30m", "45s")
    #[serde(default = "default_expires_in")]
    pub expires_in: String,
    /// 발급자 (iss claim)
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// 수신자 (aud claim)
    #[serde(default = "default_audience")]
    pub audience: String,
    /// 개발용 대체 시크릿 사용 여부 (환경 변수 미설정)
    #[serde(skip)]
    pub fallback_secret: bool,
}

fn default_expires_in() -> String {
    "7d".to_string()
}

fn default_issuer() -> String {
    DEFAULT_ISSUER.to_string()
}

fn default_audience() -> String {
    DEFAULT_AUDIENCE.to_string()
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: SecretString::from(DEV_FALLBACK_SECRET.to_string()),
            expires_in: default_expires_in(),
            issuer: default_issuer(),
            audience: default_audience(),
            fallback_secret: true,
        }
    }
}

impl TokenConfig {
    /// 환경 변수에서 설정 로드.
    ///
    /// `JWT_SECRET`이 없으면 개발용 대체 시크릿을 사용하고
    /// `fallback_secret` 플래그를 설정합니다. 호출자(main)는 이 플래그를
    /// 보고 시작 경고를 출력해야 합니다.
    pub fn from_env() -> Self {
        let (secret, fallback_secret) = match std::env::var("JWT_SECRET") {
            Ok(s) if !s.is_empty() => (SecretString::from(s), false),
            _ => (SecretString::from(DEV_FALLBACK_SECRET.to_string()), true),
        };
        let expires_in =
            std::env::var("JWT_EXPIRES_IN").unwrap_or_else(|_| default_expires_in());
        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| default_issuer());
        let audience = std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| default_audience());

        Self {
            secret,
            expires_in,
            issuer,
            audience,
            fallback_secret,
        }
    }

    /// 유효 기간 문자열을 파싱해 반환합니다.
    pub fn ttl(&self) -> AuthResult<Duration> {
        parse_duration(&self.expires_in)
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 환경 변수에서 전체 설정을 로드합니다.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            token: TokenConfig::from_env(),
            logging: LoggingConfig {
                level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
                format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            },
        }
    }

    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3001)?
            .set_default("database.max_connections", 10)?
            .set_default("database.connection_timeout_secs", 30)?
            .set_default("token.secret", DEV_FALLBACK_SECRET)?
            .set_default("token.expires_in", "7d")?
            .set_default("token.issuer", DEFAULT_ISSUER)?
            .set_default("token.audience", DEFAULT_AUDIENCE)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("AUTH")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

/// 기간 문자열 파싱.
///
/// `s`(초), `m`(분), `h`(시간), `d`(일) 접미사를 지원하며,
/// 접미사가 없는 정수는 초로 해석합니다.
pub fn parse_duration(s: &str) -> AuthResult<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return Err(AuthError::Config("기간 문자열이 비어 있습니다".to_string()));
    }

    let (value, unit) = match s.chars().last() {
        Some(c) if c.is_ascii_alphabetic() => (&s[..s.len() - 1], Some(c.to_ascii_lowercase())),
        _ => (s, None),
    };

    let n: i64 = value
        .parse()
        .map_err(|_| AuthError::Config(format!("잘못된 기간 문자열: {s}")))?;

    match unit {
        None | Some('s') => Ok(Duration::seconds(n)),
        Some('m') => Ok(Duration::minutes(n)),
        Some('h') => Ok(Duration::hours(n)),
        Some('d') => Ok(Duration::days(n)),
        Some(u) => Err(AuthError::Config(format!("알 수 없는 기간 단위: {u}"))),
    }
}
