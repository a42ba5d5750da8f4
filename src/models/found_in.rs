use std::fmt;
use std::str::FromStr;

use diesel::deserialize::{FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::{Sqlite, SqliteValue};
use serde::{Deserialize, Serialize};

use super::ParseEnumError;

/// Where a lost item was picked up
///
/// Stored in the database as lowercase TEXT and serialized to JSON the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum FoundIn {
    /// On board a bus, tram or train
    Vehicle,
    /// Inside a station building or on a platform
    Station,
    /// At a roadside stop or shelter
    Stop,
    /// At a depot or garage, usually during cleaning
    Depot,
    /// Anywhere else
    Other,
}

impl FoundIn {
    /// Every variant, in declaration order
    pub const ALL: [FoundIn; 5] = [
        FoundIn::Vehicle,
        FoundIn::Station,
        FoundIn::Stop,
        FoundIn::Depot,
        FoundIn::Other,
    ];

    /// The stored and serialized name of the variant
    pub fn as_str(&self) -> &'static str {
        match self {
            FoundIn::Vehicle => "vehicle",
            FoundIn::Station => "station",
            FoundIn::Stop => "stop",
            FoundIn::Depot => "depot",
            FoundIn::Other => "other",
        }
    }
}

impl fmt::Display for FoundIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for FoundIn {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        FoundIn::ALL
            .into_iter()
            .find(|variant| variant.as_str() == normalized)
            .ok_or_else(|| ParseEnumError {
                kind: "found_in",
                value: s.to_string(),
            })
    }
}

impl FromSql<Text, Sqlite> for FoundIn {
    fn from_sql(value: SqliteValue<'_, '_, '_>) -> diesel::deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        Ok(text.parse()?)
    }
}

impl ToSql<Text, Sqlite> for FoundIn {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str());
        Ok(IsNull::No)
    }
}
