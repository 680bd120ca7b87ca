use crate::error::ApiError;
use crate::models::{key_from_path, read_body};
use crate::routes::headers;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header::HeaderName, StatusCode, Uri},
};

/// GET /{key} handler - Read the text stored under a key
///
/// Answers 200 whether or not the key exists; an absent key reads as `null`.
pub async fn get_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<(StatusCode, [(HeaderName, &'static str); 4], String), ApiError> {
    let key = key_from_path(uri.path());

    let stored = state.store.get(key).await?;
    match &stored {
        Some(_) => tracing::info!("Successfully read record with key: {:?}", key),
        None => tracing::info!("No record with key: {:?}", key),
    }

    Ok((StatusCode::OK, headers::STANDARD, read_body(stored.as_deref())?))
}
