/// Catalog storage abstraction
///
/// The recommendation pipeline and the HTTP layer only ever talk to this
/// trait, so the in-memory implementation can be swapped for a persistent
/// backing store without touching either.
use crate::models::{
    InsertUser, InsertVideo, InsertWatchHistory, InsertWatchlist, User, UserPreferences, Video,
    WatchHistoryEntry, WatchlistEntry,
};

#[cfg(test)]
use mockall::automock;

pub mod memory;

pub use memory::MemStorage;

/// Read/write operations over the catalog and per-user watch state.
///
/// Read operations hand out cloned snapshots and are safe under concurrent
/// readers. None of the in-process operations can fail; absence is modeled
/// with `Option` and emptiness with an empty `Vec`.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    // User operations
    async fn get_user(&self, id: i32) -> Option<User>;
    async fn get_user_by_username(&self, username: &str) -> Option<User>;
    async fn get_user_by_email(&self, email: &str) -> Option<User>;
    async fn create_user(&self, user: InsertUser) -> User;
    /// Replaces the user's preference set wholesale; no merging.
    async fn update_user_preferences(
        &self,
        user_id: i32,
        preferences: UserPreferences,
    ) -> Option<User>;

    // Video operations
    async fn get_all_videos(&self) -> Vec<Video>;
    async fn get_video_by_id(&self, id: i32) -> Option<Video>;
    async fn get_videos_by_category(&self, category: &str) -> Vec<Video>;
    async fn get_videos_by_genre(&self, genre: &str) -> Vec<Video>;
    async fn get_trending_videos(&self) -> Vec<Video>;
    /// First featured record in catalog iteration order, if any.
    async fn get_featured_video(&self) -> Option<Video>;
    /// Case-insensitive substring match over title, description, and genre
    /// tags.
    async fn search_videos(&self, query: &str) -> Vec<Video>;
    async fn create_video(&self, video: InsertVideo) -> Video;

    // Watch history operations
    async fn get_watch_history(&self, user_id: i32) -> Vec<WatchHistoryEntry>;
    async fn add_to_watch_history(&self, entry: InsertWatchHistory) -> WatchHistoryEntry;
    async fn update_watch_progress(
        &self,
        user_id: i32,
        video_id: i32,
        progress: i32,
    ) -> Option<WatchHistoryEntry>;

    // Watchlist operations
    async fn get_watchlist(&self, user_id: i32) -> Vec<WatchlistEntry>;
    /// Idempotent per (user, video): adding a pair that is already live
    /// returns the existing entry unchanged.
    async fn add_to_watchlist(&self, entry: InsertWatchlist) -> WatchlistEntry;
    async fn remove_from_watchlist(&self, user_id: i32, video_id: i32) -> bool;
    async fn is_in_watchlist(&self, user_id: i32, video_id: i32) -> bool;
}
