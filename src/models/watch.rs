use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of a user's watch history.
///
/// `video_id` is expected to reference an existing video but the store does
/// not enforce referential integrity. `progress` is an opaque counter set by
/// the playback client; it carries no declared unit and is not validated
/// against the video's duration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryEntry {
    pub id: i32,
    pub user_id: i32,
    pub video_id: i32,
    pub watched_at: DateTime<Utc>,
    pub progress: i32,
}

/// A watch-history row as submitted for insertion; the store stamps
/// `watched_at` and assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertWatchHistory {
    pub user_id: i32,
    pub video_id: i32,
    #[serde(default)]
    pub progress: i32,
}

/// One saved-for-later entry. At most one live entry exists per
/// (user, video) pair; the store enforces this on insertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub id: i32,
    pub user_id: i32,
    pub video_id: i32,
    pub added_at: DateTime<Utc>,
}

/// A watchlist row as submitted for insertion; the store stamps `added_at`
/// and assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertWatchlist {
    pub user_id: i32,
    pub video_id: i32,
}
