use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{FoundIn, LostItemStatus};

/// Deserializes a field that distinguishes "absent" from "explicitly null"
///
/// Used together with `#[serde(default)]`: a missing field stays `None`,
/// `null` becomes `Some(None)` and a value becomes `Some(Some(value))`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Data transfer object for registering a new lost item
///
/// This struct is used to deserialize JSON requests for creating lost items.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateLostItemDto {
    /// Short label for the item
    pub title: String,

    /// Free-form details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Where the item was picked up
    pub found_in: FoundIn,

    /// Transit route the item is associated with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_number: Option<String>,

    /// Vehicle the item is associated with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<String>,

    /// When the item was found; defaults to the time of registration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_at: Option<DateTime<Utc>>,

    /// Where the item is being held
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_location: Option<String>,

    /// Initial status; defaults to `found`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LostItemStatus>,
}

/// Data transfer object for updating a lost item
///
/// Absent fields are left unchanged. The nullable text fields may be sent as
/// `null` to clear them.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UpdateLostItemDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_in: Option<FoundIn>,

    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub route_number: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub storage_location: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LostItemStatus>,
}

/// Data transfer object for filtering the list of lost items
///
/// Every filter is optional; the filters that are present are combined with AND.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LostItemQueryDto {
    /// Only items with this status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LostItemStatus>,

    /// Only items found in this kind of place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_in: Option<FoundIn>,

    /// Only items associated with this route
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_number: Option<String>,

    /// Only items associated with this vehicle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<String>,

    /// `true` for items still held, `false` for closed cases
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,

    /// Only items found at or after this time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_after: Option<DateTime<Utc>>,

    /// Only items found at or before this time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_before: Option<DateTime<Utc>>,

    /// Substring to look for in the title or description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Maximum number of items to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    /// Number of items to skip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}


#[cfg(test)]
mod prop_tests;
