use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Failure of a single request
///
/// Every variant becomes an opaque `500 Internal Server Error` with an empty
/// body. The cause is logged here and never sent to the client.
#[derive(Debug)]
pub enum ApiError {
    /// PUT body is not valid JSON
    MalformedBody(serde_json::Error),
    /// Key-value backend failed, or a value could not be encoded
    Store(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MalformedBody(err) => {
                tracing::error!("Request body is not valid JSON: {}", err);
            }
            ApiError::Store(err) => {
                tracing::error!("Store operation failed: {:#}", err);
            }
        }

        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Store(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::MalformedBody(err)
    }
}
