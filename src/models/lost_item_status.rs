use std::fmt;
use std::str::FromStr;

use diesel::deserialize::{FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::{Sqlite, SqliteValue};
use serde::{Deserialize, Serialize};

use super::ParseEnumError;

/// Lifecycle state of a lost-item case
///
/// Any state may follow any other; no transition order is enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum LostItemStatus {
    /// Reported by staff, not yet handed in to storage
    #[default]
    Found,
    /// Held at a storage location
    Stored,
    /// An owner has come forward and the claim is being checked
    Claimed,
    /// Handed back to its owner
    Returned,
    /// Discarded, donated or destroyed after the retention period
    Disposed,
}

impl LostItemStatus {
    /// Every variant, in declaration order
    pub const ALL: [LostItemStatus; 5] = [
        LostItemStatus::Found,
        LostItemStatus::Stored,
        LostItemStatus::Claimed,
        LostItemStatus::Returned,
        LostItemStatus::Disposed,
    ];

    /// Statuses for which the item is still physically held
    pub const OPEN: [LostItemStatus; 2] = [LostItemStatus::Found, LostItemStatus::Stored];

    /// The stored and serialized name of the variant
    pub fn as_str(&self) -> &'static str {
        match self {
            LostItemStatus::Found => "found",
            LostItemStatus::Stored => "stored",
            LostItemStatus::Claimed => "claimed",
            LostItemStatus::Returned => "returned",
            LostItemStatus::Disposed => "disposed",
        }
    }

    /// Whether the item is still held by the operator
    pub fn is_open(&self) -> bool {
        Self::OPEN.contains(self)
    }
}

impl fmt::Display for LostItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for LostItemStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        LostItemStatus::ALL
            .into_iter()
            .find(|variant| variant.as_str() == normalized)
            .ok_or_else(|| ParseEnumError {
                kind: "status",
                value: s.to_string(),
            })
    }
}

impl FromSql<Text, Sqlite> for LostItemStatus {
    fn from_sql(value: SqliteValue<'_, '_, '_>) -> diesel::deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        Ok(text.parse()?)
    }
}

impl ToSql<Text, Sqlite> for LostItemStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str());
        Ok(IsNull::No)
    }
}
