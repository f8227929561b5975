//! 인증 endpoint.
//!
//! 가입, 로그인, 프로필 조회, 토큰 검증을 위한 REST API를 제공합니다.
//!
//! # 엔드포인트
//!
//! - `POST /api/auth/register` - 가입 (201, 중복 이메일 409)
//! - `POST /api/auth/login` - 로그인 (200, 잘못된 자격증명 401, 비활성 계정 403)
//! - `GET /api/auth/profile` - 내 프로필 (인증 필요)
//! - `GET /api/auth/verify` - 토큰 유효성 확인 (인증 필요)
//! - `GET /api/auth/users` - 전체 계정 목록 (관리자 전용)

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use auth_core::{normalize_email, NewUserAccount, Role, UserProfile};

use crate::auth::{hash_password, verify_password, AdminAuth, Claims, JwtAuth};
use crate::error::{ApiError, ApiResponse, ApiResult};
use crate::extract::ValidatedJson;
use crate::state::AppState;

/// 자격증명 실패 시의 고정 메시지.
///
/// 이메일 미존재와 비밀번호 불일치가 같은 문구를 반환해야 어느 쪽이
/// 틀렸는지 노출되지 않습니다.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ==================== 요청 타입 ====================

/// 가입 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// 이메일 (저장 전 소문자로 정규화)
    #[serde(default)]
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// 비밀번호 (최소 6자)
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    /// 이름
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required (email, password, firstName, lastName)"))]
    pub first_name: String,
    /// 성
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required (email, password, firstName, lastName)"))]
    pub last_name: String,
    /// 역할 (생략 시 일반 사용자)
    #[serde(default)]
    pub role: Option<Role>,
}

/// 로그인 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,
}

// ==================== 응답 타입 ====================

/// 가입/로그인 응답 데이터.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthData {
    /// 비밀번호 해시가 제거된 사용자 정보
    pub user: UserProfile,
    /// 발급된 JWT
    pub token: String,
}

/// 프로필 응답 데이터.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileData {
    pub user: UserProfile,
}

/// 토큰 검증 응답 데이터.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyData {
    /// 검증된 토큰의 claim
    pub user: Claims,
}

/// 계정 목록 응답 데이터.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UsersData {
    pub users: Vec<UserProfile>,
    pub total: usize,
}

// ==================== 핸들러 ====================

/// 가입.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "가입 성공, 토큰 포함", body = AuthData),
        (status = 400, description = "필수 필드 누락 또는 형식 오류"),
        (status = 409, description = "이미 존재하는 이메일"),
    )
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AuthData>>)> {
    let email = normalize_email(&req.email);

    // 친절한 에러를 위한 사전 조회. 경합 시 저장소의 unique 제약이
    // 같은 Conflict를 돌려준다.
    if state.repo.find_by_email(&email).await?.is_some() {
        return Err(ApiError::Conflict(
            "User with this email already exists".to_string(),
        ));
    }

    let password_hash =
        hash_password(&req.password).map_err(|e| ApiError::Internal(e.to_string()))?;

    let user = state
        .repo
        .create(NewUserAccount {
            email,
            password_hash,
            first_name: req.first_name,
            last_name: req.last_name,
            role: req.role.unwrap_or_default(),
        })
        .await?;

    let token = state
        .codec
        .issue(&user.id.to_string(), &user.email, user.role)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "User registered successfully",
            AuthData {
                user: user.to_profile(),
                token,
            },
        )),
    ))
}

/// 로그인.
///
/// 확인 순서는 존재 → 활성 → 비밀번호로 고정됩니다. 비활성 계정은
/// 비밀번호를 비교하기 전에 거부되므로 비밀번호 정오가 타이밍으로
/// 새지 않습니다.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공, 토큰 포함", body = AuthData),
        (status = 401, description = "잘못된 이메일 또는 비밀번호"),
        (status = 403, description = "비활성화된 계정"),
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<AuthData>>> {
    let email = normalize_email(&req.email);

    let user = state
        .repo
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if !user.is_active {
        return Err(ApiError::Forbidden(
            "Account is deactivated. Please contact support.".to_string(),
        ));
    }

    if !verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token = state
        .codec
        .issue(&user.id.to_string(), &user.email, user.role)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(ApiResponse::ok(
        "Login successful",
        AuthData {
            user: user.to_profile(),
            token,
        },
    )))
}

/// 내 프로필 조회.
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = "auth",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "프로필", body = ProfileData),
        (status = 401, description = "토큰 없음"),
        (status = 403, description = "만료/무효 토큰"),
        (status = 404, description = "계정 없음"),
    )
)]
pub async fn profile(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
) -> ApiResult<Json<ApiResponse<ProfileData>>> {
    // 토큰은 유효하지만 계정이 그 사이 삭제되었을 수 있음
    let id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ApiError::NotFound("User not found".to_string()))?;

    let user = state
        .repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::ok(
        "Profile retrieved successfully",
        ProfileData {
            user: user.to_profile(),
        },
    )))
}

/// 토큰 유효성 확인.
///
/// 여기 도달했다는 것은 추출기가 토큰을 이미 검증했다는 뜻입니다.
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    tag = "auth",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "유효한 토큰", body = VerifyData),
        (status = 401, description = "토큰 없음"),
        (status = 403, description = "만료/무효 토큰"),
    )
)]
pub async fn verify(JwtAuth(claims): JwtAuth) -> Json<ApiResponse<VerifyData>> {
    Json(ApiResponse::ok("Token is valid", VerifyData { user: claims }))
}

/// 전체 계정 목록 (관리자 전용).
#[utoipa::path(
    get,
    path = "/api/auth/users",
    tag = "auth",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "계정 목록", body = UsersData),
        (status = 401, description = "토큰 없음"),
        (status = 403, description = "관리자 아님"),
    )
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AdminAuth(_claims): AdminAuth,
) -> ApiResult<Json<ApiResponse<UsersData>>> {
    let users = state.repo.list().await?;

    Ok(Json(ApiResponse::ok(
        "Users retrieved successfully",
        UsersData {
            total: users.len(),
            users: users.iter().map(|u| u.to_profile()).collect(),
        },
    )))
}

/// 인증 라우터 생성.
pub fn auth_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile", get(profile))
        .route("/verify", get(verify))
        .route("/users", get(list_users))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request},
    };
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::routes::create_api_router;
    use crate::state::create_test_state;

    fn test_app() -> (Router, Arc<AppState>) {
        let state = Arc::new(create_test_state());
        (create_api_router(state.clone()), state)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    fn register_body(email: &str) -> Value {
        json!({
            "email": email,
            "password": "Test123!",
            "firstName": "A",
            "lastName": "B",
        })
    }

    async fn register_and_get_token(app: &Router, email: &str, role: Option<&str>) -> String {
        let mut body = register_body(email);
        if let Some(role) = role {
            body["role"] = json!(role);
        }

        let (status, value) = send(app, Method::POST, "/api/auth/register", None, Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        value["data"]["token"].as_str().unwrap().to_string()
    }

    // ==================== 가입 ====================

    #[tokio::test]
    async fn test_register_returns_created_with_user_token() {
        let (app, _state) = test_app();

        let (status, value) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(register_body("a@b.com")),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["user"]["email"], "a@b.com");
        assert_eq!(value["data"]["user"]["role"], "user");

        // 응답 어디에도 비밀번호/해시가 없어야 함
        let raw = value.to_string();
        assert!(!raw.contains("password"));
        assert!(!raw.contains("argon2"));

        // 토큰을 비권위적으로 디코딩하면 역할이 user
        let token = value["data"]["token"].as_str().unwrap();
        let claims = crate::auth::TokenCodec::decode(token).unwrap();
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.email, "a@b.com");
    }

    #[tokio::test]
    async fn test_register_normalizes_email() {
        let (app, state) = test_app();

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(register_body("  USER@Example.Com ")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let stored = state
            .repo
            .find_by_email("user@example.com")
            .await
            .unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let (app, _state) = test_app();

        let (first, _) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(register_body("a@b.com")),
        )
        .await;
        assert_eq!(first, StatusCode::CREATED);

        let (second, value) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(register_body("a@b.com")),
        )
        .await;
        assert_eq!(second, StatusCode::CONFLICT);
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "User with this email already exists");
    }

    #[tokio::test]
    async fn test_register_short_password_is_bad_request() {
        let (app, _state) = test_app();

        let mut body = register_body("a@b.com");
        body["password"] = json!("12345");

        let (status, value) = send(&app, Method::POST, "/api/auth/register", None, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "Password must be at least 6 characters long");
    }

    #[tokio::test]
    async fn test_register_missing_fields_is_bad_request() {
        let (app, _state) = test_app();

        let (status, value) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({"email": "a@b.com", "password": "Test123!"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["success"], false);
    }

    // ==================== 로그인 ====================

    #[tokio::test]
    async fn test_login_success_issues_fresh_token() {
        let (app, _state) = test_app();
        register_and_get_token(&app, "a@b.com", None).await;

        let (status, value) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "a@b.com", "password": "Test123!"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["user"]["email"], "a@b.com");
        assert!(value["data"]["token"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_login_failure_message_does_not_leak_which_part_failed() {
        let (app, _state) = test_app();
        register_and_get_token(&app, "a@b.com", None).await;

        // 존재하는 이메일 + 잘못된 비밀번호
        let (wrong_pw_status, wrong_pw) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "a@b.com", "password": "WrongPass1"})),
        )
        .await;

        // 존재하지 않는 이메일
        let (unknown_status, unknown) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "ghost@b.com", "password": "Test123!"})),
        )
        .await;

        assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);

        // 외부에서 관찰 가능한 결과가 완전히 동일해야 함
        assert_eq!(wrong_pw["message"], unknown["message"]);
        assert_eq!(wrong_pw["message"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_login_deactivated_account_is_forbidden() {
        let (app, state) = test_app();
        register_and_get_token(&app, "a@b.com", None).await;

        // 계정 비활성화 (계정 관리 플로우는 이 서비스 범위 밖이므로 저장소 직접 조작)
        let mut user = state.repo.find_by_email("a@b.com").await.unwrap().unwrap();
        user.is_active = false;
        state.repo.update(user).await.unwrap();

        let (status, value) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "a@b.com", "password": "Test123!"})),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(value["message"], "Account is deactivated. Please contact support.");
    }

    #[tokio::test]
    async fn test_login_missing_fields_is_bad_request() {
        let (app, _state) = test_app();

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "a@b.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // ==================== 인증 파이프라인 ====================

    #[tokio::test]
    async fn test_protected_route_without_header_is_unauthorized() {
        let (app, _state) = test_app();

        let (status, value) = send(&app, Method::GET, "/api/auth/profile", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "Access token required");
    }

    #[tokio::test]
    async fn test_protected_route_with_malformed_header_is_unauthorized() {
        let (app, _state) = test_app();

        // Bearer 접두사가 없는 헤더
        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/auth/profile")
            .header(header::AUTHORIZATION, "Token abc.def.ghi")
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_protected_route_with_garbage_token_is_forbidden() {
        let (app, _state) = test_app();

        let (status, value) = send(
            &app,
            Method::GET,
            "/api/auth/profile",
            Some("garbage-token"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(value["message"], "Invalid token");
    }

    #[tokio::test]
    async fn test_protected_route_with_expired_token_is_forbidden() {
        let (app, state) = test_app();

        // 7일 TTL 토큰을 8일 전 시점으로 발급
        let expired = state
            .codec
            .issue_at(
                &Uuid::new_v4().to_string(),
                "a@b.com",
                Role::User,
                Utc::now() - Duration::days(8),
            )
            .unwrap();

        let (status, value) = send(
            &app,
            Method::GET,
            "/api/auth/profile",
            Some(&expired),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(value["message"], "Token expired");
    }

    #[tokio::test]
    async fn test_profile_roundtrip() {
        let (app, _state) = test_app();
        let token = register_and_get_token(&app, "a@b.com", None).await;

        let (status, value) = send(
            &app,
            Method::GET,
            "/api/auth/profile",
            Some(&token),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["data"]["user"]["email"], "a@b.com");
        assert_eq!(value["data"]["user"]["firstName"], "A");
    }

    #[tokio::test]
    async fn test_profile_of_deleted_account_is_not_found() {
        let (app, state) = test_app();

        // 유효한 토큰이지만 저장소에 없는 계정
        let token = state
            .codec
            .issue(&Uuid::new_v4().to_string(), "ghost@b.com", Role::User)
            .unwrap();

        let (status, value) = send(
            &app,
            Method::GET,
            "/api/auth/profile",
            Some(&token),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(value["message"], "User not found");
    }

    #[tokio::test]
    async fn test_verify_returns_claims() {
        let (app, _state) = test_app();
        let token = register_and_get_token(&app, "a@b.com", None).await;

        let (status, value) = send(&app, Method::GET, "/api/auth/verify", Some(&token), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["message"], "Token is valid");
        assert_eq!(value["data"]["user"]["email"], "a@b.com");
        assert_eq!(value["data"]["user"]["role"], "user");
    }

    // ==================== 역할 게이트 ====================

    #[tokio::test]
    async fn test_admin_route_rejects_user_role_naming_required_set() {
        let (app, _state) = test_app();
        let token = register_and_get_token(&app, "user@b.com", None).await;

        let (status, value) = send(&app, Method::GET, "/api/auth/users", Some(&token), None).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(value["message"], "Access denied. Required role: admin");
    }

    #[tokio::test]
    async fn test_admin_route_allows_admin_role() {
        let (app, _state) = test_app();
        register_and_get_token(&app, "user@b.com", None).await;
        let admin_token = register_and_get_token(&app, "admin@b.com", Some("admin")).await;

        let (status, value) = send(
            &app,
            Method::GET,
            "/api/auth/users",
            Some(&admin_token),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["data"]["total"], 2);
    }

    #[tokio::test]
    async fn test_admin_route_without_token_is_unauthorized() {
        let (app, _state) = test_app();

        let (status, _) = send(&app, Method::GET, "/api/auth/users", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
