use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::utils::{error_codes, error_to_api_response};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("请求过于频繁，请在{retry_after}秒后重试")]
    RateLimited { retry_after: u64 },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = error_to_api_response::<()>(error_codes::RATE_LIMIT, self.to_string());

        match self {
            AppError::RateLimited { retry_after } => {
                let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();
                response
                    .headers_mut()
                    .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
                response
            }
        }
    }
}
