/// Web API Handlers
///
/// This module contains the handlers for the RESTful API endpoints.
/// Each handler is responsible for processing a specific type of HTTP request,
/// extracting the necessary data, calling the appropriate repository functions,
/// and returning a properly formatted response.

mod lost_item_handlers;

pub use lost_item_handlers::*;

use crate::errors::ApiError;

/// Fallback for routes that exist but do not accept the request's method
pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}
