use crate::error::ApiError;
use crate::models::{key_from_path, stored_text};
use crate::routes::headers;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header::HeaderName, StatusCode, Uri},
};
use serde_json::Value as JsonValue;

/// PUT /{key} handler - Store a JSON value
///
/// The body is parsed as JSON whatever its content type. The stored text is
/// echoed back as-is, without the extra string wrapping a read applies.
pub async fn put_handler(
    State(state): State<AppState>,
    uri: Uri,
    body: Bytes,
) -> Result<(StatusCode, [(HeaderName, &'static str); 4], String), ApiError> {
    let key = key_from_path(uri.path());
    let value: JsonValue = serde_json::from_slice(&body)?;
    let text = stored_text(&value)?;

    state.store.put(key, text.clone()).await?;

    tracing::info!("Successfully stored record with key: {:?}", key);
    Ok((StatusCode::OK, headers::STANDARD, text))
}

#[cfg(test)]
mod tests {
    use crate::app::test_support::{body_string, failing_app, send, test_app};
    use crate::store::KvStore;
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_put_echoes_raw_value() {
        let (app, store) = test_app();

        let response = send(&app, Method::PUT, "/xyz", Some(r#"{"a":1}"#)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        assert_eq!(body_string(response).await, r#"{"a":1}"#);
        assert_eq!(store.get("xyz").await.unwrap().as_deref(), Some(r#"{"a":1}"#));
    }

    #[tokio::test]
    async fn test_put_normalizes_whitespace() {
        let (app, _store) = test_app();

        let response = send(&app, Method::PUT, "/xyz", Some("{ \"a\" : [1, 2] }")).await;

        assert_eq!(body_string(response).await, r#"{"a":[1,2]}"#);
    }

    #[tokio::test]
    async fn test_put_string_value_is_stored_unquoted() {
        let (app, store) = test_app();

        let response = send(&app, Method::PUT, "/greeting", Some(r#""hello""#)).await;

        assert_eq!(body_string(response).await, "hello");
        assert_eq!(store.get("greeting").await.unwrap().as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_put_overwrites_previous_value() {
        let (app, store) = test_app();

        send(&app, Method::PUT, "/k", Some(r#"{"v":1}"#)).await;
        send(&app, Method::PUT, "/k", Some("[true]")).await;

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("[true]"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_put_root_writes_empty_key() {
        let (app, store) = test_app();

        let response = send(&app, Method::PUT, "/", Some("1")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.get("").await.unwrap().as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_put_invalid_json_fails() {
        let (app, store) = test_app();

        let response = send(&app, Method::PUT, "/xyz", Some("{invalid json}")).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_string(response).await.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_put_empty_body_fails() {
        let (app, _store) = test_app();

        let response = send(&app, Method::PUT, "/xyz", None).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_put_store_failure_is_500() {
        let app = failing_app();

        let response = send(&app, Method::PUT, "/xyz", Some(r#"{"a":1}"#)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_string(response).await.is_empty());
    }
}
