use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::Error;

/// Promotion window a listing can be created with. The wire form is the
/// human-facing label; storage keeps the elapsed-seconds value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StickyDuration {
    #[default]
    NoSticky,
    Hours24,
    Days7,
    Days14,
    Days30,
}

impl StickyDuration {
    pub const LABELS: [&'static str; 5] = ["No sticky", "24 hours", "7 days", "14 days", "30 days"];

    pub fn label(self) -> &'static str {
        match self {
            StickyDuration::NoSticky => "No sticky",
            StickyDuration::Hours24 => "24 hours",
            StickyDuration::Days7 => "7 days",
            StickyDuration::Days14 => "14 days",
            StickyDuration::Days30 => "30 days",
        }
    }

    /// Fixed-length elapsed seconds. "30 days" is exactly 2_592_000 seconds,
    /// never a calendar month.
    pub fn as_secs(self) -> i64 {
        match self {
            StickyDuration::NoSticky => 0,
            StickyDuration::Hours24 => 86_400,
            StickyDuration::Days7 => 604_800,
            StickyDuration::Days14 => 1_209_600,
            StickyDuration::Days30 => 2_592_000,
        }
    }

    pub fn from_secs(secs: i64) -> Option<Self> {
        match secs {
            0 => Some(StickyDuration::NoSticky),
            86_400 => Some(StickyDuration::Hours24),
            604_800 => Some(StickyDuration::Days7),
            1_209_600 => Some(StickyDuration::Days14),
            2_592_000 => Some(StickyDuration::Days30),
            _ => None,
        }
    }

    pub fn expires_at(self, created_at: DateTime<Utc>) -> DateTime<Utc> {
        created_at + Duration::seconds(self.as_secs())
    }
}

impl std::str::FromStr for StickyDuration {
    type Err = Error;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "No sticky" => Ok(StickyDuration::NoSticky),
            "24 hours" => Ok(StickyDuration::Hours24),
            "7 days" => Ok(StickyDuration::Days7),
            "14 days" => Ok(StickyDuration::Days14),
            "30 days" => Ok(StickyDuration::Days30),
            other => Err(Error::InvalidDuration(other.to_string())),
        }
    }
}

impl std::fmt::Display for StickyDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for StickyDuration {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for StickyDuration {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// A persisted job listing. `votes` and `sticky_seconds` are nullable in
/// storage; readers treat NULL as 0 via the accessors below. Timestamps are
/// integer epoch milliseconds. Only the vote operation mutates a listing
/// after creation (`votes` plus an `updated_at` refresh).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Listing {
    pub id: Uuid,
    pub image: Option<String>,
    pub company: String,
    pub offer: String,
    pub location: String,
    pub link: String,
    pub votes: Option<i64>,
    pub min_salary: Option<i64>,
    pub max_salary: Option<i64>,
    pub tags: Option<Json<Vec<String>>>,
    pub sticky_seconds: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Listing {
    pub fn vote_count(&self) -> i64 {
        self.votes.unwrap_or(0)
    }

    pub fn sticky_secs(&self) -> i64 {
        self.sticky_seconds.unwrap_or(0)
    }

    /// Last instant (epoch ms) at which the listing still counts as promoted.
    pub fn promoted_until_millis(&self) -> i64 {
        self.created_at + self.sticky_secs() * 1000
    }
}
