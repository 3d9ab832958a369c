//! Data structures for the access key inventory.
//!
//! A search produces a list of [`KeyRecord`]s which is rendered to the
//! console and then reused as the operand list for lifecycle actions.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use std::fmt;

/// Access key status as understood by the filters and actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyStatus {
    Active,
    Inactive,
}

impl KeyStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `--last-used` value that selects keys which have never been used.
pub const NEVER_USED: i64 = -1;

/// Filter predicates applied during a search.
///
/// # Fields
///
/// - `last_used`: minimum days since last use; [`NEVER_USED`] keeps only
///   keys that have never been used
/// - `username`: exact IAM user name to restrict the scan to
/// - `status`: keep only keys with this status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub last_used: i64,
    pub username: Option<String>,
    pub status: Option<KeyStatus>,
}

impl SearchFilters {
    pub fn matches_user(&self, user_name: &str) -> bool {
        self.username.as_deref().map_or(true, |u| u == user_name)
    }

    /// `status` is the lower-cased status reported by IAM.
    pub fn matches_status(&self, status: &str) -> bool {
        self.status.map_or(true, |s| s.as_str() == status)
    }

    /// Keys never used count as 0 days old, so a positive threshold
    /// excludes them; use [`NEVER_USED`] to target them.
    pub fn matches_last_used(&self, last_used: Option<DateTime<Utc>>, days: i64) -> bool {
        if days < self.last_used {
            return false;
        }
        !(self.last_used == NEVER_USED && last_used.is_some())
    }

    /// True once the user named by the username filter has been processed.
    pub fn is_target_user(&self, user_name: &str) -> bool {
        self.username.as_deref() == Some(user_name)
    }
}

/// A matched access key together with its usage metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRecord {
    pub user_name: String,
    pub access_key_id: String,
    pub status: String,
    pub created: Option<DateTime<Utc>>,
    pub last_used: Option<DateTime<Utc>>,
    /// Whole days since last use, 0 for never-used keys
    pub last_used_days: i64,
    pub last_service: Option<String>,
    pub last_region: Option<String>,
}

/// Outcome of a search pass.
#[derive(Debug, Clone, Default)]
pub struct SearchReport {
    pub records: Vec<KeyRecord>,
    pub users_scanned: usize,
    pub keys_scanned: usize,
    /// Keys skipped because their last-used lookup failed
    pub lookup_failures: usize,
}
