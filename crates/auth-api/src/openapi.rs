//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use auth_core::{Role, UserProfile};

use crate::auth::Claims;
use crate::routes::auth::{
    AuthData, LoginRequest, ProfileData, RegisterRequest, UsersData, VerifyData,
};
use crate::routes::health::{ComponentStatus, HealthResponse};

/// Auth API 문서.
///
/// 모든 엔드포인트와 스키마를 포함하는 OpenAPI 3.0 스펙입니다.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Perfume Commerce Auth API",
        description = r#"
향수 커머스 플랫폼의 인증 서비스 REST API입니다.

## 주요 기능

- **가입/로그인**: 이메일+비밀번호 기반 계정 생성 및 인증
- **토큰**: JWT 발급 및 검증 (기본 유효 기간 7일)
- **역할**: admin/user 역할 기반 접근 제어

## 인증

보호된 엔드포인트는 JWT Bearer 토큰 인증이 필요합니다.
`Authorization: Bearer <token>` 헤더를 포함하세요.
"#,
        version = "0.1.0",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3001", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "auth", description = "가입, 로그인, 프로필, 토큰 검증"),
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
    ),
    paths(
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::profile,
        crate::routes::auth::verify,
        crate::routes::auth::list_users,
        crate::routes::health::health_check,
        crate::routes::health::health_ready,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        AuthData,
        ProfileData,
        VerifyData,
        UsersData,
        Claims,
        UserProfile,
        Role,
        HealthResponse,
        ComponentStatus,
    )),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Bearer 토큰 보안 스키마 등록.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Swagger UI 라우터 생성.
pub fn swagger_ui_router() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
