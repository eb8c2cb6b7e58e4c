pub mod openai;
pub mod user;
pub mod video;
pub mod watch;

pub use user::{InsertUser, User, UserPreferences};
pub use video::{InsertVideo, Video};
pub use watch::{InsertWatchHistory, InsertWatchlist, WatchHistoryEntry, WatchlistEntry};
