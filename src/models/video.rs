use serde::{Deserialize, Serialize};

/// A catalog entry: a movie, series, or documentary known to the platform.
///
/// `category` is an open string enumeration ("movies", "series",
/// "documentaries", ...) rather than a closed enum so new shelves can be
/// added without a schema change. Playback is delegated to the embedded
/// player behind `video_url`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Unique, stable identifier for the video
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub thumbnail_url: String,
    /// Embeddable player reference
    pub video_url: String,
    pub category: String,
    /// Ordered genre tags
    #[serde(default)]
    pub genre: Option<Vec<String>>,
    pub year: i32,
    /// Human-readable runtime ("2h 28m", "5 Seasons")
    pub duration: String,
    #[serde(default)]
    pub rating: Option<String>,
    /// String-encoded numeric score
    #[serde(default)]
    pub imdb_score: Option<String>,
    #[serde(default)]
    pub trending: bool,
    /// At most one catalog entry should carry this flag at a time, but the
    /// store does not enforce it; callers must tolerate zero or many.
    #[serde(default)]
    pub featured: bool,
}

/// A video record as submitted for insertion, before the store assigns an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertVideo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub thumbnail_url: String,
    pub video_url: String,
    pub category: String,
    #[serde(default)]
    pub genre: Option<Vec<String>>,
    pub year: i32,
    pub duration: String,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub imdb_score: Option<String>,
    #[serde(default)]
    pub trending: bool,
    #[serde(default)]
    pub featured: bool,
}

impl InsertVideo {
    /// Materializes the record with the id the store assigned it.
    pub fn into_video(self, id: i32) -> Video {
        Video {
            id,
            title: self.title,
            description: self.description,
            thumbnail_url: self.thumbnail_url,
            video_url: self.video_url,
            category: self.category,
            genre: self.genre,
            year: self.year,
            duration: self.duration,
            rating: self.rating,
            imdb_score: self.imdb_score,
            trending: self.trending,
            featured: self.featured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_serializes_camel_case() {
        let video = Video {
            id: 1,
            title: "Inception".to_string(),
            description: None,
            thumbnail_url: "https://img.example/1.jpg".to_string(),
            video_url: "https://www.youtube.com/embed/YoHD9XEInc0".to_string(),
            category: "movies".to_string(),
            genre: Some(vec!["sci-fi".to_string()]),
            year: 2010,
            duration: "2h 28m".to_string(),
            rating: Some("PG-13".to_string()),
            imdb_score: Some("8.8".to_string()),
            trending: true,
            featured: true,
        };

        let json = serde_json::to_value(&video).unwrap();
        assert_eq!(json["thumbnailUrl"], "https://img.example/1.jpg");
        assert_eq!(json["videoUrl"], "https://www.youtube.com/embed/YoHD9XEInc0");
        assert_eq!(json["imdbScore"], "8.8");
        assert_eq!(json["trending"], true);
    }

    #[test]
    fn test_insert_video_into_video() {
        let insert = InsertVideo {
            title: "Dune".to_string(),
            description: None,
            thumbnail_url: "https://img.example/4.jpg".to_string(),
            video_url: "https://www.youtube.com/embed/n9xhJrPXop4".to_string(),
            category: "movies".to_string(),
            genre: Some(vec!["sci-fi".to_string(), "adventure".to_string()]),
            year: 2021,
            duration: "2h 35m".to_string(),
            rating: None,
            imdb_score: None,
            trending: false,
            featured: false,
        };

        let video = insert.into_video(42);
        assert_eq!(video.id, 42);
        assert_eq!(video.title, "Dune");
        assert_eq!(video.year, 2021);
    }

    #[test]
    fn test_insert_video_defaults_flags() {
        let json = r#"{
            "title": "Our Planet",
            "thumbnailUrl": "https://img.example/3.jpg",
            "videoUrl": "https://www.youtube.com/embed/aETNYyrqNYE",
            "category": "documentaries",
            "year": 2019,
            "duration": "8 Episodes"
        }"#;

        let insert: InsertVideo = serde_json::from_str(json).unwrap();
        assert!(!insert.trending);
        assert!(!insert.featured);
        assert_eq!(insert.genre, None);
    }
}
