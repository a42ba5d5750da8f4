/// Lostfound: a lost-and-found tracker for a transit operator
///
/// This library provides the core functionality for recording items left on
/// vehicles, at stations and at stops, and for following each item until it
/// is returned to its owner or disposed of.
///
/// ### Modules
///
/// - `backup`: Periodic snapshots of the SQLite database
/// - `config`: Layered configuration from defaults, file, environment and flags
/// - `db`: Database connection management
/// - `dto`: Request and query payloads
/// - `errors`: API error type and its HTTP mapping
/// - `handlers`: Axum request handlers
/// - `logging`: Tracing subscriber setup
/// - `models`: Data structures representing lost items
/// - `repo`: Repository layer for database operations
/// - `schema`: Database schema definitions
///
/// ### Web API
///
/// - `POST /lost_items`: Register a lost item
/// - `GET /lost_items`: List lost items, filtered by the query string
/// - `GET /lost_items/{id}`: Get a lost item by ID
/// - `PATCH /lost_items/{id}`: Update a lost item
/// - `DELETE /lost_items/{id}`: Delete a lost item

pub mod backup;
pub mod config;
pub mod db;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod repo;
pub mod schema;

#[cfg(test)]
mod test_utils;

use axum::{
    routing::get,
    Router,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::*;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Creates the application router with all routes
///
/// ### Arguments
///
/// * `pool` - The database connection pool shared by all handlers
///
/// ### Returns
///
/// An Axum Router configured with all routes and the database pool as state
pub fn create_app(pool: Arc<db::DbPool>) -> Router {
    Router::new()
        .route(
            "/lost_items",
            get(list_lost_items_handler).post(create_lost_item_handler),
        )
        .route(
            "/lost_items/{id}",
            get(get_lost_item_handler)
                .patch(update_lost_item_handler)
                .delete(delete_lost_item_handler),
        )
        .method_not_allowed_fallback(method_not_allowed_handler)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(pool)
}

/// Applies any pending database migrations
///
/// ### Errors
///
/// Returns an error if a migration fails to apply.
pub fn run_migrations(conn: &mut diesel::SqliteConnection) -> anyhow::Result<()> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    Ok(())
}
