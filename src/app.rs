use crate::handlers::{
    get_handler, identifier_handler, not_found_handler, preflight_handler, put_handler,
};
use crate::routes;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::trace::TraceLayer;

/// Build the service router.
///
/// | Method  | `/`             | `/{key}` |
/// |---------|-----------------|----------|
/// | GET     | new identifier  | read     |
/// | PUT     | write key `""`  | write    |
/// | OPTIONS | preflight       | preflight|
/// | other   | 404             | 404      |
///
/// Request bodies are not size-limited.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(routes::ROOT, with_common_methods(get(identifier_handler)))
        .route(routes::RECORD, with_common_methods(get(get_handler)))
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// PUT, OPTIONS and the 404 fallback shared by both routes. HEAD is routed
/// explicitly so it does not fall through to the GET handler.
fn with_common_methods(router: MethodRouter<AppState>) -> MethodRouter<AppState> {
    router
        .put(put_handler)
        .options(preflight_handler)
        .head(not_found_handler)
        .fallback(not_found_handler)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::build_router;
    use crate::moniker::NicknameGenerator;
    use crate::state::AppState;
    use crate::store::{KvStore, MemoryStore, StoreFuture};
    use axum::{
        body::Body,
        http::{Method, Request},
        response::Response,
        Router,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Store whose every operation fails, standing in for an unreachable backend
    pub struct FailingStore;

    impl KvStore for FailingStore {
        fn get<'a>(&'a self, _key: &'a str) -> StoreFuture<'a, Option<String>> {
            Box::pin(std::future::ready(Err::<Option<String>, _>(anyhow::anyhow!("backend unavailable"))))
        }

        fn put<'a>(&'a self, _key: &'a str, _value: String) -> StoreFuture<'a, ()> {
            Box::pin(std::future::ready(Err::<(), _>(anyhow::anyhow!("backend unavailable"))))
        }
    }

    pub fn test_app() -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(
            store.clone(),
            Arc::new(NicknameGenerator::with_seed(1)),
        );
        (build_router(state), store)
    }

    pub fn failing_app() -> Router {
        let state = AppState::new(
            Arc::new(FailingStore),
            Arc::new(NicknameGenerator::with_seed(1)),
        );
        build_router(state)
    }

    pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> Response {
        let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
        app.clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }
}
