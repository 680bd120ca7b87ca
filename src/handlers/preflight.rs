use crate::routes::headers;
use axum::http::{header::HeaderName, StatusCode};

/// OPTIONS handler - CORS preflight, headers only
pub async fn preflight_handler() -> (StatusCode, [(HeaderName, &'static str); 4]) {
    (StatusCode::OK, headers::STANDARD)
}

/// Any method or path outside the routing table
pub async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}
