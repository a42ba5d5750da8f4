use crate::db::{retry_on_busy, DbPool};
use crate::dto::{LostItemQueryDto, UpdateLostItemDto};
use crate::models::{FoundIn, LostItem, LostItemStatus, NewLostItem};
use crate::schema::lost_items;
use anyhow::Result;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use tracing::{debug, info, instrument};

/// Upper bound on the page size of a list query
pub const MAX_LIST_LIMIT: i64 = 500;

/// Page size used when a list query does not ask for one
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Registers a new lost item in the database
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `new_item` - The item to insert; the database assigns its ID
///
/// ### Returns
///
/// A Result containing the stored LostItem, including its new ID
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database insert operation fails
#[instrument(skip(pool, new_item), fields(title = %new_item.get_title()))]
pub async fn create_lost_item(pool: &DbPool, new_item: NewLostItem) -> Result<LostItem> {
    debug!("Registering new lost item");

    let mut conn = pool.get()?;

    let created: LostItem = retry_on_busy(|| {
        diesel::insert_into(lost_items::table)
            .values(&new_item)
            .returning(LostItem::as_returning())
            .get_result(&mut conn)
    })
    .await?;

    info!("Registered lost item with id: {}", created.get_id());

    Ok(created)
}

/// Retrieves a lost item from the database by its ID
///
/// ### Returns
///
/// A Result containing an Option with the LostItem if found, or None if not found
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails for reasons other than the item not existing
#[instrument(skip(pool))]
pub fn get_lost_item(pool: &DbPool, item_id: i64) -> Result<Option<LostItem>> {
    debug!("Retrieving lost item by id");

    let conn = &mut pool.get()?;

    let result: Option<LostItem> = lost_items::table
        .find(item_id)
        .select(LostItem::as_select())
        .first(conn)
        .optional()?;

    if result.is_none() {
        debug!("Lost item not found");
    }

    Ok(result)
}

/// Lists lost items matching the given filters
///
/// Items are ordered by `found_at`, newest first, with ties broken by
/// descending ID so that the order is stable across pages.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `query` - The filters to apply; absent filters match everything
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
#[instrument(skip(pool))]
pub fn list_lost_items(pool: &DbPool, query: &LostItemQueryDto) -> Result<Vec<LostItem>> {
    debug!("Listing lost items");

    let conn = &mut pool.get()?;

    let mut statement = lost_items::table
        .select(LostItem::as_select())
        .into_boxed();

    if let Some(status) = query.status {
        statement = statement.filter(lost_items::status.eq(status));
    }
    if let Some(found_in) = query.found_in {
        statement = statement.filter(lost_items::found_in.eq(found_in));
    }
    if let Some(ref route_number) = query.route_number {
        statement = statement.filter(lost_items::route_number.eq(route_number.clone()));
    }
    if let Some(ref vehicle_number) = query.vehicle_number {
        statement = statement.filter(lost_items::vehicle_number.eq(vehicle_number.clone()));
    }
    match query.open {
        Some(true) => {
            statement = statement.filter(lost_items::status.eq_any(LostItemStatus::OPEN));
        }
        Some(false) => {
            statement = statement.filter(lost_items::status.ne_all(LostItemStatus::OPEN));
        }
        None => {}
    }
    if let Some(found_after) = query.found_after {
        statement = statement.filter(lost_items::found_at.ge(found_after.naive_utc()));
    }
    if let Some(found_before) = query.found_before {
        statement = statement.filter(lost_items::found_at.le(found_before.naive_utc()));
    }
    if let Some(pattern) = query.search.as_deref().and_then(like_pattern) {
        statement = statement.filter(
            lost_items::title
                .like(pattern.clone())
                .escape(LIKE_ESCAPE)
                .nullable()
                .or(lost_items::description.like(pattern).escape(LIKE_ESCAPE)),
        );
    }

    let limit = query
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);
    let offset = query.offset.unwrap_or(0).max(0);

    let result: Vec<LostItem> = statement
        .order((lost_items::found_at.desc(), lost_items::id.desc()))
        .limit(limit)
        .offset(offset)
        .load(conn)?;

    info!("Retrieved {} lost items", result.len());

    Ok(result)
}

/// Escape character used by the search `LIKE` patterns
const LIKE_ESCAPE: char = '\\';

/// Builds a `LIKE` pattern matching `search` literally anywhere in the text, or None for a blank search
///
/// `%`, `_` and the escape character itself are escaped so they only match themselves.
fn like_pattern(search: &str) -> Option<String> {
    let search = search.trim();
    if search.is_empty() {
        return None;
    }

    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

/// Column changes for an update; `None` leaves a column untouched
#[derive(AsChangeset, Debug)]
#[diesel(table_name = lost_items)]
struct LostItemChangeset {
    title: Option<String>,
    description: Option<Option<String>>,
    found_in: Option<FoundIn>,
    route_number: Option<Option<String>>,
    vehicle_number: Option<Option<String>>,
    found_at: Option<NaiveDateTime>,
    storage_location: Option<Option<String>>,
    status: Option<LostItemStatus>,
    updated_at: NaiveDateTime,
}

/// Updates a lost item in the database by its ID
///
/// Only the fields present in `update` are changed. `updated_at` is always
/// set to the current time.
///
/// ### Returns
///
/// A Result containing the updated LostItem, or None if no item has that ID
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database update operation fails
#[instrument(skip(pool, update))]
pub async fn update_lost_item(pool: &DbPool, item_id: i64, update: &UpdateLostItemDto) -> Result<Option<LostItem>> {
    debug!("Updating lost item by id");

    let changeset = LostItemChangeset {
        title: update.title.clone(),
        description: update.description.clone(),
        found_in: update.found_in,
        route_number: update.route_number.clone(),
        vehicle_number: update.vehicle_number.clone(),
        found_at: update.found_at.map(|found_at| found_at.naive_utc()),
        storage_location: update.storage_location.clone(),
        status: update.status,
        updated_at: Utc::now().naive_utc(),
    };

    let mut conn = pool.get()?;

    let updated: Option<LostItem> = retry_on_busy(|| {
        diesel::update(lost_items::table.find(item_id))
            .set(&changeset)
            .returning(LostItem::as_returning())
            .get_result(&mut conn)
            .optional()
    })
    .await?;

    match updated {
        Some(ref item) => info!("Updated lost item, status is now {}", item.get_status()),
        None => debug!("Lost item not found"),
    }

    Ok(updated)
}

/// Deletes a lost item from the database by its ID
///
/// ### Returns
///
/// A Result containing true if an item was deleted, or false if no item has that ID
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database delete operation fails
#[instrument(skip(pool))]
pub async fn delete_lost_item(pool: &DbPool, item_id: i64) -> Result<bool> {
    debug!("Deleting lost item by id");

    let mut conn = pool.get()?;

    let deleted = retry_on_busy(|| {
        diesel::delete(lost_items::table.find(item_id)).execute(&mut conn)
    })
    .await?;

    if deleted > 0 {
        info!("Deleted lost item");
    }

    Ok(deleted > 0)
}
