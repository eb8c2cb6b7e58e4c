use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{
    InsertUser, InsertVideo, InsertWatchHistory, InsertWatchlist, User, UserPreferences, Video,
    WatchHistoryEntry, WatchlistEntry,
};
use crate::storage::CatalogStore;

/// In-memory catalog store standing in for a future database.
///
/// Entities live in `BTreeMap`s keyed by id, so every listing operation
/// iterates in ascending-id order and stays deterministic across calls.
/// Reads clone snapshots out from under a read guard; writers never block
/// concurrent readers mid-iteration.
pub struct MemStorage {
    inner: RwLock<MemStorageInner>,
}

struct MemStorageInner {
    users: BTreeMap<i32, User>,
    videos: BTreeMap<i32, Video>,
    watch_history: BTreeMap<i32, WatchHistoryEntry>,
    watchlist: BTreeMap<i32, WatchlistEntry>,
    next_user_id: i32,
    next_video_id: i32,
    next_watch_history_id: i32,
    next_watchlist_id: i32,
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStorage {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemStorageInner::empty()),
        }
    }

    /// Creates a store pre-populated with the demo catalog and demo user
    pub fn with_sample_data() -> Self {
        let mut inner = MemStorageInner::empty();
        inner.seed();
        Self {
            inner: RwLock::new(inner),
        }
    }
}

impl MemStorageInner {
    fn empty() -> Self {
        Self {
            users: BTreeMap::new(),
            videos: BTreeMap::new(),
            watch_history: BTreeMap::new(),
            watchlist: BTreeMap::new(),
            next_user_id: 1,
            next_video_id: 1,
            next_watch_history_id: 1,
            next_watchlist_id: 1,
        }
    }

    fn seed(&mut self) {
        let sample_videos = vec![
            Video {
                id: 1,
                title: "Inception".to_string(),
                description: Some(
                    "A thief who steals corporate secrets through dream-sharing technology \
                     is given the inverse task of planting an idea into the mind of a C.E.O."
                        .to_string(),
                ),
                thumbnail_url:
                    "https://images.unsplash.com/photo-1478720568477-b692582de08c?w=400&h=600"
                        .to_string(),
                video_url: "https://www.youtube.com/embed/YoHD9XEInc0".to_string(),
                category: "movies".to_string(),
                genre: Some(vec![
                    "sci-fi".to_string(),
                    "action".to_string(),
                    "thriller".to_string(),
                ]),
                year: 2010,
                duration: "2h 28m".to_string(),
                rating: Some("PG-13".to_string()),
                imdb_score: Some("8.8".to_string()),
                trending: true,
                featured: true,
            },
            Video {
                id: 2,
                title: "Breaking Bad".to_string(),
                description: Some(
                    "A high school chemistry teacher diagnosed with inoperable lung cancer \
                     turns to manufacturing and selling methamphetamine."
                        .to_string(),
                ),
                thumbnail_url:
                    "https://images.unsplash.com/photo-1489599833308-aad1d8b0e7ee?w=400&h=600"
                        .to_string(),
                video_url: "https://www.youtube.com/embed/HhesaQXLuRY".to_string(),
                category: "series".to_string(),
                genre: Some(vec!["drama".to_string(), "crime".to_string()]),
                year: 2008,
                duration: "5 Seasons".to_string(),
                rating: Some("TV-MA".to_string()),
                imdb_score: Some("9.5".to_string()),
                trending: true,
                featured: false,
            },
            Video {
                id: 3,
                title: "Our Planet".to_string(),
                description: Some(
                    "Documentary series focusing on the breadth of the diversity of habitats \
                     around the world."
                        .to_string(),
                ),
                thumbnail_url:
                    "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=400&h=600"
                        .to_string(),
                video_url: "https://www.youtube.com/embed/aETNYyrqNYE".to_string(),
                category: "documentaries".to_string(),
                genre: Some(vec!["nature".to_string(), "documentary".to_string()]),
                year: 2019,
                duration: "8 Episodes".to_string(),
                rating: Some("TV-G".to_string()),
                imdb_score: Some("9.3".to_string()),
                trending: false,
                featured: false,
            },
            Video {
                id: 4,
                title: "Dune".to_string(),
                description: Some(
                    "Feature adaptation of Frank Herbert's science fiction novel about the son \
                     of a noble family entrusted with the protection of the most valuable asset."
                        .to_string(),
                ),
                thumbnail_url:
                    "https://images.unsplash.com/photo-1518298804355-6a9d6d8c51e7?w=400&h=600"
                        .to_string(),
                video_url: "https://www.youtube.com/embed/n9xhJrPXop4".to_string(),
                category: "movies".to_string(),
                genre: Some(vec!["sci-fi".to_string(), "adventure".to_string()]),
                year: 2021,
                duration: "2h 35m".to_string(),
                rating: Some("PG-13".to_string()),
                imdb_score: Some("8.1".to_string()),
                trending: true,
                featured: false,
            },
            Video {
                id: 5,
                title: "Stranger Things".to_string(),
                description: Some(
                    "When a young boy disappears, his mother, a police chief and his friends \
                     must confront terrifying supernatural forces."
                        .to_string(),
                ),
                thumbnail_url:
                    "https://images.unsplash.com/photo-1440404653325-ab127d49abc1?w=400&h=600"
                        .to_string(),
                video_url: "https://www.youtube.com/embed/b9EkMc79ZSU".to_string(),
                category: "series".to_string(),
                genre: Some(vec![
                    "sci-fi".to_string(),
                    "horror".to_string(),
                    "drama".to_string(),
                ]),
                year: 2016,
                duration: "4 Seasons".to_string(),
                rating: Some("TV-14".to_string()),
                imdb_score: Some("8.7".to_string()),
                trending: true,
                featured: false,
            },
            Video {
                id: 6,
                title: "The Social Dilemma".to_string(),
                description: Some(
                    "Explores the dangerous human impact of social networking, with tech \
                     experts sounding the alarm on their own creations."
                        .to_string(),
                ),
                thumbnail_url:
                    "https://images.unsplash.com/photo-1562577309-4932fdd64cd1?w=400&h=600"
                        .to_string(),
                video_url: "https://www.youtube.com/embed/uaaC57tcci0".to_string(),
                category: "documentaries".to_string(),
                genre: Some(vec!["documentary".to_string(), "tech".to_string()]),
                year: 2020,
                duration: "1h 34m".to_string(),
                rating: Some("PG-13".to_string()),
                imdb_score: Some("7.6".to_string()),
                trending: false,
                featured: false,
            },
        ];

        for video in sample_videos {
            self.next_video_id = self.next_video_id.max(video.id + 1);
            self.videos.insert(video.id, video);
        }

        let demo_user = User {
            id: 1,
            username: "demo_user".to_string(),
            email: "demo@streamvision.com".to_string(),
            preferences: UserPreferences {
                genres: Some(vec![
                    "sci-fi".to_string(),
                    "action".to_string(),
                    "thriller".to_string(),
                ]),
                categories: Some(vec!["movies".to_string(), "series".to_string()]),
            },
            created_at: Utc::now(),
        };
        self.next_user_id = 2;
        self.users.insert(demo_user.id, demo_user);
    }
}

#[async_trait::async_trait]
impl CatalogStore for MemStorage {
    async fn get_user(&self, id: i32) -> Option<User> {
        self.inner.read().await.users.get(&id).cloned()
    }

    async fn get_user_by_username(&self, username: &str) -> Option<User> {
        let inner = self.inner.read().await;
        inner
            .users
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    async fn get_user_by_email(&self, email: &str) -> Option<User> {
        let inner = self.inner.read().await;
        inner.users.values().find(|user| user.email == email).cloned()
    }

    async fn create_user(&self, user: InsertUser) -> User {
        let mut inner = self.inner.write().await;
        let id = inner.next_user_id;
        inner.next_user_id += 1;

        let user = User {
            id,
            username: user.username,
            email: user.email,
            preferences: user.preferences,
            created_at: Utc::now(),
        };
        inner.users.insert(id, user.clone());
        user
    }

    async fn update_user_preferences(
        &self,
        user_id: i32,
        preferences: UserPreferences,
    ) -> Option<User> {
        let mut inner = self.inner.write().await;
        let user = inner.users.get_mut(&user_id)?;
        user.preferences = preferences;
        Some(user.clone())
    }

    async fn get_all_videos(&self) -> Vec<Video> {
        self.inner.read().await.videos.values().cloned().collect()
    }

    async fn get_video_by_id(&self, id: i32) -> Option<Video> {
        self.inner.read().await.videos.get(&id).cloned()
    }

    async fn get_videos_by_category(&self, category: &str) -> Vec<Video> {
        let inner = self.inner.read().await;
        inner
            .videos
            .values()
            .filter(|video| video.category == category)
            .cloned()
            .collect()
    }

    async fn get_videos_by_genre(&self, genre: &str) -> Vec<Video> {
        let inner = self.inner.read().await;
        inner
            .videos
            .values()
            .filter(|video| {
                video
                    .genre
                    .as_ref()
                    .is_some_and(|tags| tags.iter().any(|tag| tag == genre))
            })
            .cloned()
            .collect()
    }

    async fn get_trending_videos(&self) -> Vec<Video> {
        let inner = self.inner.read().await;
        inner
            .videos
            .values()
            .filter(|video| video.trending)
            .cloned()
            .collect()
    }

    async fn get_featured_video(&self) -> Option<Video> {
        let inner = self.inner.read().await;
        inner.videos.values().find(|video| video.featured).cloned()
    }

    async fn search_videos(&self, query: &str) -> Vec<Video> {
        let query = query.to_lowercase();
        let inner = self.inner.read().await;
        inner
            .videos
            .values()
            .filter(|video| {
                video.title.to_lowercase().contains(&query)
                    || video
                        .description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&query))
                    || video.genre.as_ref().is_some_and(|tags| {
                        tags.iter().any(|tag| tag.to_lowercase().contains(&query))
                    })
            })
            .cloned()
            .collect()
    }

    async fn create_video(&self, video: InsertVideo) -> Video {
        let mut inner = self.inner.write().await;
        let id = inner.next_video_id;
        inner.next_video_id += 1;

        let video = video.into_video(id);
        inner.videos.insert(id, video.clone());
        video
    }

    async fn get_watch_history(&self, user_id: i32) -> Vec<WatchHistoryEntry> {
        let inner = self.inner.read().await;
        inner
            .watch_history
            .values()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect()
    }

    async fn add_to_watch_history(&self, entry: InsertWatchHistory) -> WatchHistoryEntry {
        let mut inner = self.inner.write().await;
        let id = inner.next_watch_history_id;
        inner.next_watch_history_id += 1;

        let entry = WatchHistoryEntry {
            id,
            user_id: entry.user_id,
            video_id: entry.video_id,
            watched_at: Utc::now(),
            progress: entry.progress,
        };
        inner.watch_history.insert(id, entry.clone());
        entry
    }

    async fn update_watch_progress(
        &self,
        user_id: i32,
        video_id: i32,
        progress: i32,
    ) -> Option<WatchHistoryEntry> {
        let mut inner = self.inner.write().await;
        let entry = inner
            .watch_history
            .values_mut()
            .find(|entry| entry.user_id == user_id && entry.video_id == video_id)?;
        entry.progress = progress;
        Some(entry.clone())
    }

    async fn get_watchlist(&self, user_id: i32) -> Vec<WatchlistEntry> {
        let inner = self.inner.read().await;
        inner
            .watchlist
            .values()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect()
    }

    async fn add_to_watchlist(&self, entry: InsertWatchlist) -> WatchlistEntry {
        let mut inner = self.inner.write().await;

        // At most one live entry per (user, video) pair
        if let Some(existing) = inner
            .watchlist
            .values()
            .find(|e| e.user_id == entry.user_id && e.video_id == entry.video_id)
        {
            return existing.clone();
        }

        let id = inner.next_watchlist_id;
        inner.next_watchlist_id += 1;

        let entry = WatchlistEntry {
            id,
            user_id: entry.user_id,
            video_id: entry.video_id,
            added_at: Utc::now(),
        };
        inner.watchlist.insert(id, entry.clone());
        entry
    }

    async fn remove_from_watchlist(&self, user_id: i32, video_id: i32) -> bool {
        let mut inner = self.inner.write().await;
        let id = inner
            .watchlist
            .values()
            .find(|entry| entry.user_id == user_id && entry.video_id == video_id)
            .map(|entry| entry.id);

        match id {
            Some(id) => {
                inner.watchlist.remove(&id);
                true
            }
            None => false,
        }
    }

    async fn is_in_watchlist(&self, user_id: i32, video_id: i32) -> bool {
        let inner = self.inner.read().await;
        inner
            .watchlist
            .values()
            .any(|entry| entry.user_id == user_id && entry.video_id == video_id)
    }
}
