/// Data models module
///
/// This module defines the core data structures used throughout the application.
/// It includes the database model for lost items and the two enumerations that
/// classify where an item was found and how far its case has progressed.

use thiserror::Error;

mod found_in;
pub use found_in::FoundIn;

mod lost_item_status;
pub use lost_item_status::LostItemStatus;

mod lost_item;
pub use lost_item::{LostItem, NewLostItem};

/// Error returned when text does not name a known enumeration value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} value: {value:?}")]
pub struct ParseEnumError {
    /// Which enumeration was being parsed
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}
