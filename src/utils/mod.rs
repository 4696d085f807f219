use axum::Json;

use crate::result::ApiResponse;

pub fn error_to_api_response<T>(code: i32, msg: String) -> Json<ApiResponse<T>> {
    Json(ApiResponse::error(code, msg))
}

pub mod error_codes {
    pub const RATE_LIMIT: i32 = 1005;
}
