//! Campus API Service
//!
//! REST CRUD endpoints over the student and review collections, each
//! persisted as a flat JSON array document on disk.
//!
//! ## Endpoints
//!
//! Per collection (`students`, `reviews`):
//!
//! - `POST /<collection>` - Create a record (201, body is the new id)
//! - `GET /<collection>` - List all records
//! - `GET /<collection>/{id}` - Get one record
//! - `PUT /<collection>/{id}` - Replace a record wholesale
//! - `DELETE /<collection>/{id}` - Delete a record (204)
//!
//! Plus `GET /health` for liveness checks.

pub mod config;
pub mod handlers;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use collection_store::{Collection, FieldRule, FileStore};

pub use handlers::ApiError;

/// Resource collections served by this API.
pub const COLLECTIONS: [&str; 2] = ["students", "reviews"];

/// Shared application state: one record collection per resource, each
/// behind its own lock so load-modify-persist cycles run serially within
/// the process.
pub struct AppState {
    collections: HashMap<String, Mutex<Collection>>,
}

impl AppState {
    /// Wire every collection against its backing file in `data_dir`.
    pub fn new(data_dir: &Path) -> Self {
        let mut collections = HashMap::new();

        for name in COLLECTIONS {
            let store = FileStore::new(data_dir.join(format!("{name}.json")));
            let collection = Collection::new(name, store, creation_rules(name));
            collections.insert(name.to_string(), Mutex::new(collection));
        }

        Self { collections }
    }

    /// Look up a registered collection by route name.
    pub fn collection(&self, name: &str) -> Option<&Mutex<Collection>> {
        self.collections.get(name)
    }
}

/// Creation rule set for a collection, fixed at registration time.
fn creation_rules(name: &str) -> Vec<FieldRule> {
    match name {
        "reviews" => vec![
            FieldRule::required("comment"),
            FieldRule::required_integer("rate"),
            FieldRule::required_integer("id"),
        ],
        _ => Vec::new(),
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/{collection}", post(handlers::create_record_handler))
        .route("/{collection}", get(handlers::list_records_handler))
        .route("/{collection}/{id}", get(handlers::get_record_handler))
        .route("/{collection}/{id}", put(handlers::replace_record_handler))
        .route(
            "/{collection}/{id}",
            delete(handlers::delete_record_handler),
        )
        .with_state(shared_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
