//! The state shared by the request handlers.

use axum::extract::FromRef;

use crate::{backend::BackendClient, store::SharedStore};

/// The state of the dashboard server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The latest data loaded from the backend.
    pub store: SharedStore,

    /// The client used to reload the store.
    pub backend: BackendClient,
}

impl AppState {
    /// Create a new [AppState] with the store `store`.
    pub fn new(store: SharedStore, backend: BackendClient) -> Self {
        Self { store, backend }
    }
}

impl FromRef<AppState> for SharedStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}
