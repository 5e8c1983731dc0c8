//! Lesson loading and caching
//!
//! Lessons live at `data/<category>/<id>.json` under the configured
//! source. Loading never fails from the caller's point of view: any fetch
//! or validation problem is logged and replaced with a synthetic fallback
//! lesson. Only real lessons enter the cache, which lives for the whole
//! process unless explicitly cleared.

use std::collections::HashMap;
use std::path::PathBuf;

use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::{self, Category};
use super::model::{FALLBACK_KIND, Lesson, QuizQuestion, TeachingItem};

/// Where lesson JSON files are fetched from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonSource {
    /// Base URL of an HTTP server exposing the data directory
    Http(String),
    /// Local directory containing the data files
    Dir(PathBuf),
}

impl Default for LessonSource {
    fn default() -> Self {
        LessonSource::Dir(PathBuf::from("data"))
    }
}

/// Errors that can occur while fetching a lesson
///
/// These never escape the store; they are logged before the fallback
/// lesson is substituted.
#[derive(Debug, Error)]
pub enum LoadError {
    /// HTTP request failed
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("lesson fetch returned HTTP {0}")]
    Status(u16),

    /// Local file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Body was not a valid lesson document
    #[error("invalid lesson data: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Fetches and caches lessons by (category, id)
pub struct LessonStore {
    /// Configured lesson location
    source: LessonSource,
    /// HTTP client, shared across fetches
    client: reqwest::Client,
    /// Loaded lessons keyed by `category:id`
    cache: HashMap<String, Lesson>,
}

impl LessonStore {
    /// Create a store reading from the given source
    pub fn new(source: LessonSource) -> Self {
        Self { source, client: reqwest::Client::new(), cache: HashMap::new() }
    }

    fn cache_key(category: Category, id: &str) -> String {
        format!("{category}:{id}")
    }

    /// Load a single lesson, from cache if possible
    ///
    /// Returns the fallback lesson on any failure; never an error.
    pub async fn load_lesson(&mut self, category: Category, id: &str) -> Lesson {
        let key = Self::cache_key(category, id);

        if let Some(lesson) = self.cache.get(&key) {
            tracing::debug!("loading lesson from cache: {key}");
            return lesson.clone();
        }

        match self.fetch(category, id).await {
            Ok(lesson) => {
                tracing::info!("loaded lesson {key}: {}", lesson.title);
                self.cache.insert(key, lesson.clone());
                lesson
            }
            Err(err) => {
                tracing::warn!("using fallback for {key}: {err}");
                fallback_lesson(category, id)
            }
        }
    }

    /// Load every lesson in a category
    ///
    /// Uncached lessons are fetched concurrently; the returned order always
    /// matches the catalog's id order regardless of completion order.
    /// Lessons that failed to load are omitted rather than reported.
    pub async fn load_category_lessons(&mut self, category: Category) -> Vec<Lesson> {
        let ids = catalog::lesson_ids(category);

        let missing: Vec<&str> = ids
            .iter()
            .copied()
            .filter(|id| !self.cache.contains_key(&Self::cache_key(category, id)))
            .collect();

        let fetched = join_all(missing.iter().map(|id| self.fetch(category, id))).await;
        for (id, result) in missing.into_iter().zip(fetched) {
            match result {
                Ok(lesson) => {
                    self.cache.insert(Self::cache_key(category, id), lesson);
                }
                Err(err) => {
                    tracing::warn!("skipping {category}/{id}: {err}");
                }
            }
        }

        ids.iter().filter_map(|id| self.cache.get(&Self::cache_key(category, id)).cloned()).collect()
    }

    /// Drop all cached lessons
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        tracing::debug!("lesson cache cleared");
    }

    /// Fetch and validate one lesson from the configured source
    async fn fetch(&self, category: Category, id: &str) -> Result<Lesson, LoadError> {
        let body = match &self.source {
            LessonSource::Http(base) => {
                let url = format!("{}/{category}/{id}.json", base.trim_end_matches('/'));
                tracing::debug!("fetching lesson from {url}");
                let response = self.client.get(&url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status(status.as_u16()));
                }
                response.text().await?
            }
            LessonSource::Dir(dir) => {
                let path = dir.join(category.as_str()).join(format!("{id}.json"));
                tracing::debug!("reading lesson from {}", path.display());
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| LoadError::Io { path, source })?
            }
        };

        Ok(serde_json::from_str(&body)?)
    }
}

/// Build the synthetic lesson substituted when loading fails
pub fn fallback_lesson(category: Category, id: &str) -> Lesson {
    Lesson {
        id: id.to_string(),
        title: format!("{} Lesson", catalog::category_info(category).title),
        category,
        description: "Fallback lesson data - there was an error loading from the JSON file."
            .to_string(),
        kind: Some(FALLBACK_KIND.to_string()),
        total_items: Some(1),
        estimated_time: Some("5 minutes".to_string()),
        teaching_content: vec![TeachingItem {
            bengali: "ত্রুটি".to_string(),
            english: Some("Error".to_string()),
            phonetic: Some("Truti".to_string()),
            pronunciation_guide: None,
            audio_tip: None,
            number: None,
        }],
        quiz_questions: vec![QuizQuestion {
            question: "Could not load the quiz for this lesson.".to_string(),
            bengali_focus: None,
            phonetic_focus: None,
            options: vec!["OK".to_string()],
            correct_answer: 0,
            explanation: None,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn lesson_json(id: &str, title: &str) -> String {
        format!(
            r#"{{
                "id": "{id}",
                "title": "{title}",
                "category": "beginner",
                "teaching_content": [{{"bengali": "অ", "english": "a"}}],
                "quiz_questions": [
                    {{"question": "?", "options": ["a", "b"], "correct_answer": 0}}
                ]
            }}"#
        )
    }

    fn write_lesson(dir: &TempDir, id: &str, contents: &str) {
        let category_dir = dir.path().join("beginner");
        fs::create_dir_all(&category_dir).unwrap();
        fs::write(category_dir.join(format!("{id}.json")), contents).unwrap();
    }

    fn store(dir: &TempDir) -> LessonStore {
        LessonStore::new(LessonSource::Dir(dir.path().to_path_buf()))
    }

    #[tokio::test]
    async fn loads_lesson_from_directory() {
        let dir = TempDir::new().unwrap();
        write_lesson(&dir, "lesson1-vowels", &lesson_json("lesson1-vowels", "Vowels"));

        let mut store = store(&dir);
        let lesson = store.load_lesson(Category::Beginner, "lesson1-vowels").await;

        assert_eq!(lesson.title, "Vowels");
        assert!(!lesson.is_fallback());
    }

    #[tokio::test]
    async fn missing_file_yields_fallback() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);

        let lesson = store.load_lesson(Category::Beginner, "lesson1-vowels").await;

        assert!(lesson.is_fallback());
        assert_eq!(lesson.id, "lesson1-vowels");
        assert_eq!(lesson.teaching_content.len(), 1);
        assert_eq!(lesson.quiz_questions.len(), 1);
        assert_eq!(lesson.quiz_questions[0].options.len(), 1);
    }

    #[tokio::test]
    async fn invalid_json_yields_fallback() {
        let dir = TempDir::new().unwrap();
        write_lesson(&dir, "lesson1-vowels", "{not json");

        let mut store = store(&dir);
        let lesson = store.load_lesson(Category::Beginner, "lesson1-vowels").await;

        assert!(lesson.is_fallback());
    }

    #[tokio::test]
    async fn missing_required_fields_yield_fallback() {
        let dir = TempDir::new().unwrap();
        write_lesson(&dir, "lesson1-vowels", r#"{"id": "lesson1-vowels", "title": "X"}"#);

        let mut store = store(&dir);
        let lesson = store.load_lesson(Category::Beginner, "lesson1-vowels").await;

        assert!(lesson.is_fallback());
    }

    #[tokio::test]
    async fn cache_survives_source_changes() {
        let dir = TempDir::new().unwrap();
        write_lesson(&dir, "lesson1-vowels", &lesson_json("lesson1-vowels", "Original"));

        let mut store = store(&dir);
        let first = store.load_lesson(Category::Beginner, "lesson1-vowels").await;
        assert_eq!(first.title, "Original");

        write_lesson(&dir, "lesson1-vowels", &lesson_json("lesson1-vowels", "Changed"));
        let second = store.load_lesson(Category::Beginner, "lesson1-vowels").await;
        assert_eq!(second.title, "Original");

        store.clear_cache();
        let third = store.load_lesson(Category::Beginner, "lesson1-vowels").await;
        assert_eq!(third.title, "Changed");
    }

    #[tokio::test]
    async fn fallbacks_are_not_cached() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);

        let first = store.load_lesson(Category::Beginner, "lesson1-vowels").await;
        assert!(first.is_fallback());

        // The lesson appears after the failed attempt
        write_lesson(&dir, "lesson1-vowels", &lesson_json("lesson1-vowels", "Late"));
        let second = store.load_lesson(Category::Beginner, "lesson1-vowels").await;
        assert_eq!(second.title, "Late");
    }

    #[tokio::test]
    async fn category_load_preserves_order_and_filters_failures() {
        let dir = TempDir::new().unwrap();
        let ids = catalog::lesson_ids(Category::Beginner);

        // Only the 1st and 3rd lessons exist; the rest fail to load.
        write_lesson(&dir, ids[0], &lesson_json(ids[0], "First"));
        write_lesson(&dir, ids[2], &lesson_json(ids[2], "Third"));

        let mut store = store(&dir);
        let lessons = store.load_category_lessons(Category::Beginner).await;

        assert_eq!(lessons.len(), 2);
        assert_eq!(lessons[0].id, ids[0]);
        assert_eq!(lessons[1].id, ids[2]);
        assert!(lessons.iter().all(|l| !l.is_fallback()));
    }

    #[tokio::test]
    async fn empty_category_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);

        let lessons = store.load_category_lessons(Category::Intermediate).await;
        assert!(lessons.is_empty());
    }

    #[test]
    fn default_source_is_relative_data_dir() {
        assert_eq!(LessonSource::default(), LessonSource::Dir(PathBuf::from("data")));
    }
}
