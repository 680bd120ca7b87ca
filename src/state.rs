use crate::moniker::IdGenerator;
use crate::store::KvStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KvStore>,
    pub ids: Arc<dyn IdGenerator>,
}

impl AppState {
    pub fn new(store: Arc<dyn KvStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }
}
