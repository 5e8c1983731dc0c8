//! Static category catalog
//!
//! The three difficulty categories and their lesson id lists are fixed
//! tables. The id lists define both which files the loader fetches and the
//! denominator for category progress.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Top-level difficulty tier grouping lessons
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Beginner,
    Intermediate,
    Advanced,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 3] = [Category::Beginner, Category::Intermediate, Category::Advanced];

    /// Lowercase identifier used in paths and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Beginner => "beginner",
            Category::Intermediate => "intermediate",
            Category::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Category::Beginner),
            "intermediate" => Ok(Category::Intermediate),
            "advanced" => Ok(Category::Advanced),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Error for category names outside the fixed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0} (expected beginner, intermediate, or advanced)")]
pub struct UnknownCategory(pub String);

/// Display metadata for a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInfo {
    /// Display title
    pub title: &'static str,
    /// One-line description shown on the home screen
    pub description: &'static str,
    /// Number of lessons in the category
    pub total_lessons: usize,
}

/// Look up display metadata for a category
pub fn category_info(category: Category) -> CategoryInfo {
    let (title, description) = match category {
        Category::Beginner => {
            ("Beginner", "Start your Bengali journey with basic script and essential phrases")
        }
        Category::Intermediate => {
            ("Intermediate", "Build fluency with complex grammar and vocabulary")
        }
        Category::Advanced => ("Advanced", "Master advanced Bengali conversation and literature"),
    };

    CategoryInfo { title, description, total_lessons: lesson_ids(category).len() }
}

/// Ordered lesson ids for a category
///
/// Categories without content yet return an empty list.
pub fn lesson_ids(category: Category) -> &'static [&'static str] {
    match category {
        Category::Beginner => &[
            "lesson1-vowels",
            "lesson2-consonants",
            "lesson3-greetings",
            "lesson4-numbers",
            "lesson5-vowel-diacritics",
            "lesson6-common-nouns",
            "lesson7-simple-verbs",
            "lesson8-simple-sentences",
            "lesson9-basic-adjectives",
            "lesson10-colors-days",
            "lesson11-asking-questions",
            "lesson12-family-relationships",
            "lesson13-daily-routine-time",
            "lesson14-more-food-drink",
            "lesson15-simple-conjunctions",
            "lesson16-commands-requests",
        ],
        Category::Intermediate => &[],
        Category::Advanced => &[],
    }
}

/// Find which category a lesson id belongs to
pub fn category_of_lesson(lesson_id: &str) -> Option<Category> {
    Category::ALL.into_iter().find(|c| lesson_ids(*c).contains(&lesson_id))
}
