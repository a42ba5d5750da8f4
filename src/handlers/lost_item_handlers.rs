use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::Query;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::db::DbPool;
use crate::dto::{CreateLostItemDto, LostItemQueryDto, UpdateLostItemDto};
use crate::errors::ApiError;
use crate::models::{LostItem, NewLostItem};
use crate::repo;

/// Trims a title and rejects it when nothing is left
fn validate_title(title: &str) -> Result<String, ApiError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ApiError::InvalidInput("Title must not be empty".to_string()));
    }
    Ok(title.to_string())
}

/// Trims optional free text; blank text is stored as NULL
fn normalize_text(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

/// Handler for registering a new lost item
///
/// This function handles POST requests to `/lost_items`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `payload` - The request payload describing the item
///
/// ### Returns
///
/// The newly registered item as JSON
#[instrument(skip(pool, payload), fields(title = %payload.title, found_in = %payload.found_in))]
pub async fn create_lost_item_handler(
    State(pool): State<Arc<DbPool>>,
    Json(payload): Json<CreateLostItemDto>,
) -> Result<Json<LostItem>, ApiError> {
    info!("Registering lost item");

    let title = validate_title(&payload.title)?;
    let found_at = payload.found_at.unwrap_or_else(Utc::now);

    let new_item = NewLostItem::new(title, payload.found_in, found_at)
        .with_description(normalize_text(payload.description))
        .with_route_number(normalize_text(payload.route_number))
        .with_vehicle_number(normalize_text(payload.vehicle_number))
        .with_storage_location(normalize_text(payload.storage_location))
        .with_status(payload.status.unwrap_or_default());

    let item = repo::create_lost_item(&pool, new_item).await
        .map_err(ApiError::Database)?;

    info!("Successfully registered lost item with id: {}", item.get_id());

    Ok(Json(item))
}

/// Handler for retrieving a specific lost item
///
/// This function handles GET requests to `/lost_items/{id}`.
///
/// ### Returns
///
/// The requested item as JSON, or null if not found
#[instrument(skip(pool))]
pub async fn get_lost_item_handler(
    State(pool): State<Arc<DbPool>>,
    Path(item_id): Path<i64>,
) -> Result<Json<Option<LostItem>>, ApiError> {
    debug!("Retrieving lost item");

    let item = repo::get_lost_item(&pool, item_id)
        .map_err(ApiError::Database)?;

    Ok(Json(item))
}

/// Handler for listing lost items
///
/// This function handles GET requests to `/lost_items`. Filters are read
/// from the query string.
///
/// ### Returns
///
/// The matching items as JSON, newest first
#[instrument(skip(pool))]
pub async fn list_lost_items_handler(
    State(pool): State<Arc<DbPool>>,
    Query(query): Query<LostItemQueryDto>,
) -> Result<Json<Vec<LostItem>>, ApiError> {
    debug!("Listing lost items");

    let items = repo::list_lost_items(&pool, &query)
        .map_err(ApiError::Database)?;

    info!("Retrieved {} lost items", items.len());

    Ok(Json(items))
}

/// Handler for updating a lost item
///
/// This function handles PATCH requests to `/lost_items/{id}`. Fields that
/// are absent from the payload are left unchanged.
///
/// ### Returns
///
/// The updated item as JSON
#[instrument(skip(pool, payload))]
pub async fn update_lost_item_handler(
    State(pool): State<Arc<DbPool>>,
    Path(item_id): Path<i64>,
    Json(payload): Json<UpdateLostItemDto>,
) -> Result<Json<LostItem>, ApiError> {
    info!("Updating lost item");

    let update = UpdateLostItemDto {
        title: payload.title.as_deref().map(validate_title).transpose()?,
        description: payload.description.map(normalize_text),
        route_number: payload.route_number.map(normalize_text),
        vehicle_number: payload.vehicle_number.map(normalize_text),
        storage_location: payload.storage_location.map(normalize_text),
        ..payload
    };

    let item = repo::update_lost_item(&pool, item_id, &update).await
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound)?;

    info!("Successfully updated lost item, status: {}", item.get_status());

    Ok(Json(item))
}

/// Handler for deleting a lost item
///
/// This function handles DELETE requests to `/lost_items/{id}`.
#[instrument(skip(pool))]
pub async fn delete_lost_item_handler(
    State(pool): State<Arc<DbPool>>,
    Path(item_id): Path<i64>,
) -> Result<Json<()>, ApiError> {
    info!("Deleting lost item");

    let deleted = repo::delete_lost_item(&pool, item_id).await
        .map_err(ApiError::Database)?;

    if !deleted {
        return Err(ApiError::NotFound);
    }

    info!("Successfully deleted lost item");

    Ok(Json(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoundIn, LostItemStatus};
    use crate::test_utils::setup_test_db;
    use chrono::TimeZone;

    fn create_payload(title: &str) -> CreateLostItemDto {
        CreateLostItemDto {
            title: title.to_string(),
            description: None,
            found_in: FoundIn::Vehicle,
            route_number: None,
            vehicle_number: None,
            found_at: None,
            storage_location: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_lost_item_handler() {
        let pool = setup_test_db();

        let found_at = Utc.with_ymd_and_hms(2025, 4, 2, 16, 45, 0).unwrap();
        let payload = CreateLostItemDto {
            description: Some("  Green, size M  ".to_string()),
            route_number: Some("  ".to_string()),
            vehicle_number: Some("2071".to_string()),
            found_at: Some(found_at),
            ..create_payload("  Raincoat ")
        };

        let item = create_lost_item_handler(State(pool.clone()), Json(payload))
            .await
            .unwrap()
            .0;

        assert_eq!(item.get_title(), "Raincoat");
        assert_eq!(item.get_description(), Some("Green, size M"));
        assert_eq!(item.get_route_number(), None);
        assert_eq!(item.get_vehicle_number(), Some("2071"));
        assert_eq!(item.get_found_at(), found_at);
        assert_eq!(item.get_status(), LostItemStatus::Found);
    }

    #[tokio::test]
    async fn test_create_lost_item_handler_defaults_found_at_to_now() {
        let pool = setup_test_db();

        let before = Utc::now();
        let item = create_lost_item_handler(State(pool.clone()), Json(create_payload("Scarf")))
            .await
            .unwrap()
            .0;

        assert!(item.get_found_at() >= before);
        assert!(item.get_found_at() <= Utc::now());
    }

    #[tokio::test]
    async fn test_create_lost_item_handler_rejects_blank_title() {
        let pool = setup_test_db();

        let result = create_lost_item_handler(State(pool.clone()), Json(create_payload("   "))).await;

        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
        assert!(repo::list_lost_items(&pool, &LostItemQueryDto::default()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_lost_item_handler() {
        let pool = setup_test_db();

        let created = create_lost_item_handler(State(pool.clone()), Json(create_payload("Phone")))
            .await
            .unwrap()
            .0;

        let found = get_lost_item_handler(State(pool.clone()), Path(created.get_id()))
            .await
            .unwrap()
            .0;
        assert_eq!(found, Some(created));

        let missing = get_lost_item_handler(State(pool.clone()), Path(12345))
            .await
            .unwrap()
            .0;
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_lost_items_handler() {
        let pool = setup_test_db();

        create_lost_item_handler(State(pool.clone()), Json(create_payload("Book"))).await.unwrap();
        create_lost_item_handler(
            State(pool.clone()),
            Json(CreateLostItemDto {
                status: Some(LostItemStatus::Returned),
                ..create_payload("Cap")
            }),
        )
        .await
        .unwrap();

        let all = list_lost_items_handler(State(pool.clone()), Query(LostItemQueryDto::default()))
            .await
            .unwrap()
            .0;
        assert_eq!(all.len(), 2);

        let open = list_lost_items_handler(
            State(pool.clone()),
            Query(LostItemQueryDto { open: Some(true), ..Default::default() }),
        )
        .await
        .unwrap()
        .0;
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].get_title(), "Book");
    }

    #[tokio::test]
    async fn test_update_lost_item_handler() {
        let pool = setup_test_db();

        let created = create_lost_item_handler(State(pool.clone()), Json(create_payload("Bag")))
            .await
            .unwrap()
            .0;

        let payload = UpdateLostItemDto {
            title: Some(" Sports bag ".to_string()),
            storage_location: Some(Some("Lost property office".to_string())),
            status: Some(LostItemStatus::Stored),
            ..Default::default()
        };
        let updated = update_lost_item_handler(State(pool.clone()), Path(created.get_id()), Json(payload))
            .await
            .unwrap()
            .0;

        assert_eq!(updated.get_title(), "Sports bag");
        assert_eq!(updated.get_storage_location(), Some("Lost property office"));
        assert_eq!(updated.get_status(), LostItemStatus::Stored);
    }

    #[tokio::test]
    async fn test_update_lost_item_handler_blank_text_clears_field() {
        let pool = setup_test_db();

        let created = create_lost_item_handler(
            State(pool.clone()),
            Json(CreateLostItemDto {
                storage_location: Some("Shelf 3".to_string()),
                ..create_payload("Helmet")
            }),
        )
        .await
        .unwrap()
        .0;

        let payload = UpdateLostItemDto {
            storage_location: Some(Some("   ".to_string())),
            ..Default::default()
        };
        let updated = update_lost_item_handler(State(pool.clone()), Path(created.get_id()), Json(payload))
            .await
            .unwrap()
            .0;

        assert_eq!(updated.get_storage_location(), None);
    }

    #[tokio::test]
    async fn test_update_lost_item_handler_rejects_blank_title() {
        let pool = setup_test_db();

        let created = create_lost_item_handler(State(pool.clone()), Json(create_payload("Watch")))
            .await
            .unwrap()
            .0;

        let payload = UpdateLostItemDto {
            title: Some(String::new()),
            ..Default::default()
        };
        let result = update_lost_item_handler(State(pool.clone()), Path(created.get_id()), Json(payload)).await;

        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_update_lost_item_handler_not_found() {
        let pool = setup_test_db();

        let payload = UpdateLostItemDto {
            status: Some(LostItemStatus::Claimed),
            ..Default::default()
        };
        let result = update_lost_item_handler(State(pool.clone()), Path(777), Json(payload)).await;

        assert!(matches!(result, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_lost_item_handler() {
        let pool = setup_test_db();

        let created = create_lost_item_handler(State(pool.clone()), Json(create_payload("Doll")))
            .await
            .unwrap()
            .0;

        let result = delete_lost_item_handler(State(pool.clone()), Path(created.get_id())).await;
        assert!(result.is_ok());
        assert!(repo::get_lost_item(&pool, created.get_id()).unwrap().is_none());

        let again = delete_lost_item_handler(State(pool.clone()), Path(created.get_id())).await;
        assert!(matches!(again, Err(ApiError::NotFound)));
    }
}
