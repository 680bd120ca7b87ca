use crate::error::ApiError;
use crate::models::identifier_body;
use crate::routes::headers;
use crate::state::AppState;
use axum::{extract::State, http::header::HeaderName, http::StatusCode};

/// GET / handler - Mint a new record identifier
///
/// Never touches the store, so the identifier may already be in use.
pub async fn identifier_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, [(HeaderName, &'static str); 4], String), ApiError> {
    let id = state.ids.next();
    tracing::info!("Minted identifier: {}", id);

    Ok((StatusCode::OK, headers::STANDARD, identifier_body(&id)?))
}
