/// Repository module
///
/// This module provides the data access layer for the application.
/// It contains functions for registering, looking up, filtering, updating
/// and removing lost items.
///
/// The repository pattern abstracts away the details of database access
/// and provides a clean API for the rest of the application to use.

mod lost_item_repo;

pub use lost_item_repo::*;
