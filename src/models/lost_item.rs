use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::{FoundIn, LostItemStatus};

/// Represents a lost item recorded by the operator
///
/// This struct maps directly to the `lost_items` table in the database.
/// Fields are private; every value is read back unchanged through its accessor.
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::lost_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LostItem {
    /// Unique identifier, assigned by the database
    id: i64,

    /// Short label for the item
    title: String,

    /// Free-form details
    description: Option<String>,

    /// Where the item was picked up
    found_in: FoundIn,

    /// Transit route the item is associated with, if any
    route_number: Option<String>,

    /// Vehicle the item is associated with, if any
    vehicle_number: Option<String>,

    /// When the item was found
    found_at: NaiveDateTime,

    /// Where the item is currently held
    storage_location: Option<String>,

    /// Current state of the case
    status: LostItemStatus,

    /// When this record was created
    created_at: NaiveDateTime,

    /// When this record was last updated
    updated_at: NaiveDateTime,
}

impl LostItem {
    /// Creates a lost item with all fields specified
    ///
    /// This method is primarily used for testing and for rebuilding records
    /// outside the database.
    #[allow(clippy::too_many_arguments)]
    pub fn new_with_fields(
        id: i64,
        title: String,
        description: Option<String>,
        found_in: FoundIn,
        route_number: Option<String>,
        vehicle_number: Option<String>,
        found_at: DateTime<Utc>,
        storage_location: Option<String>,
        status: LostItemStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            found_in,
            route_number,
            vehicle_number,
            found_at: found_at.naive_utc(),
            storage_location,
            status,
            created_at: created_at.naive_utc(),
            updated_at: updated_at.naive_utc(),
        }
    }

    /// Gets the item's ID
    pub fn get_id(&self) -> i64 {
        self.id
    }

    /// Gets the item's title
    pub fn get_title(&self) -> &str {
        &self.title
    }

    /// Gets the item's description, if one was recorded
    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Gets where the item was found
    pub fn get_found_in(&self) -> FoundIn {
        self.found_in
    }

    /// Gets the associated route number, if any
    pub fn get_route_number(&self) -> Option<&str> {
        self.route_number.as_deref()
    }

    /// Gets the associated vehicle number, if any
    pub fn get_vehicle_number(&self) -> Option<&str> {
        self.vehicle_number.as_deref()
    }

    /// Gets when the item was found as a DateTime<Utc>
    pub fn get_found_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.found_at, Utc)
    }

    /// Gets the raw timestamp of when the item was found
    pub fn get_found_at_raw(&self) -> NaiveDateTime {
        self.found_at
    }

    /// Gets where the item is currently held, if known
    pub fn get_storage_location(&self) -> Option<&str> {
        self.storage_location.as_deref()
    }

    /// Gets the item's status
    pub fn get_status(&self) -> LostItemStatus {
        self.status
    }

    /// Gets the record's creation timestamp as a DateTime<Utc>
    pub fn get_created_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_at, Utc)
    }

    /// Gets the record's raw creation timestamp
    pub fn get_created_at_raw(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Gets the record's updated timestamp as a DateTime<Utc>
    pub fn get_updated_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.updated_at, Utc)
    }

    /// Gets the record's raw updated timestamp
    pub fn get_updated_at_raw(&self) -> NaiveDateTime {
        self.updated_at
    }
}

/// A lost item that has not been written to the database yet
///
/// The database assigns the ID on insert.
#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::lost_items)]
pub struct NewLostItem {
    title: String,
    description: Option<String>,
    found_in: FoundIn,
    route_number: Option<String>,
    vehicle_number: Option<String>,
    found_at: NaiveDateTime,
    storage_location: Option<String>,
    status: LostItemStatus,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl NewLostItem {
    /// Creates a new lost item with the required fields
    ///
    /// The status starts as `Found` and both bookkeeping timestamps are set
    /// to the current time.
    ///
    /// ### Arguments
    ///
    /// * `title` - Short label for the item
    /// * `found_in` - Where the item was picked up
    /// * `found_at` - When the item was found
    pub fn new(title: String, found_in: FoundIn, found_at: DateTime<Utc>) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            title,
            description: None,
            found_in,
            route_number: None,
            vehicle_number: None,
            found_at: found_at.naive_utc(),
            storage_location: None,
            status: LostItemStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_route_number(mut self, route_number: Option<String>) -> Self {
        self.route_number = route_number;
        self
    }

    pub fn with_vehicle_number(mut self, vehicle_number: Option<String>) -> Self {
        self.vehicle_number = vehicle_number;
        self
    }

    pub fn with_storage_location(mut self, storage_location: Option<String>) -> Self {
        self.storage_location = storage_location;
        self
    }

    pub fn with_status(mut self, status: LostItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn get_title(&self) -> &str {
        &self.title
    }

    pub fn get_status(&self) -> LostItemStatus {
        self.status
    }
}
