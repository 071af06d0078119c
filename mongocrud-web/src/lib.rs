//! Web front end for the record store.
//!
//! Routes render server-side HTML for listing, creating and editing records and
//! accept urlencoded form posts. Failures are answered with a JSON body of the
//! form `{"success": false, "message": "..."}`.
//!
//! | Method | Path | Action |
//! |---|---|---|
//! | GET | `/` | list all records |
//! | GET | `/create` | create form |
//! | POST | `/create` | insert, then redirect to `/` |
//! | GET | `/edit/{id}` | edit form |
//! | POST | `/edit/{id}` | update submitted fields, then redirect to `/` |
//! | POST | `/delete/{id}` | delete, then redirect to `/` |

use std::sync::Arc;

use axum::{routing::{get, post}, Router};
use tower_http::trace::TraceLayer;

use mongocrud::{
    backend::StoreBackend,
    collection::RecordCollection,
    store::DynRecordStore,
};

pub mod config;
pub mod error;
pub mod routes;
pub mod views;

/// State shared by every request handler.
#[derive(Debug)]
pub struct AppState {
    pub store: DynRecordStore,
    pub collection: String,
}

impl AppState {
    pub fn new(store: DynRecordStore, collection: impl Into<String>) -> Self {
        Self { store, collection: collection.into() }
    }

    /// The collection every route operates on.
    pub fn records(&self) -> RecordCollection<'_, Box<dyn StoreBackend>> {
        self.store.collection(&self.collection)
    }
}

/// Builds the application router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/create", get(routes::show_create).post(routes::create))
        .route("/edit/{id}", get(routes::edit_page).post(routes::edit))
        .route("/delete/{id}", post(routes::delete))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
