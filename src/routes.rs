// Route path constants - single source of truth for all API paths

pub const ROOT: &str = "/";
pub const RECORD: &str = "/{*key}";

/// Headers attached to every successful response
pub mod headers {
    use axum::http::header::{
        HeaderName, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
        ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
    };

    pub const STANDARD: [(HeaderName, &str); 4] = [
        (CONTENT_TYPE, "application/json"),
        (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (ACCESS_CONTROL_ALLOW_HEADERS, "*"),
        (ACCESS_CONTROL_ALLOW_METHODS, "PUT, GET, OPTIONS"),
    ];
}
