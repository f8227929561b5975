//! 검증이 결합된 요청 본문 추출기.
//!
//! axum의 `Json` 추출기는 본문 결함을 422로 거부하지만, 이 API의
//! 계약은 잘못된 입력에 400과 응답 봉투를 요구합니다. 이 추출기는
//! 역직렬화와 validator 검증을 묶어 모두 [`ApiError::Validation`]으로
//! 변환합니다.

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// 역직렬화 후 `validator` 규칙까지 통과한 요청 본문.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| ApiError::Validation(first_message(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

/// 검증 에러 중 첫 번째 메시지를 꺼냅니다.
fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(_, field_errors)| field_errors.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid request".to_string())
}
