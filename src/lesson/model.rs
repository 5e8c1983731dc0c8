//! Content model for lessons
//!
//! This module defines the core data structures for representing lessons.
//! The serde field names follow the lesson JSON files on disk, which are
//! treated as an external data source.

use serde::{Deserialize, Serialize};

use super::catalog::Category;

/// Marker value in the `type` field of a synthesized lesson
pub const FALLBACK_KIND: &str = "fallback";

/// A complete lesson: an ordered teaching sequence followed by a quiz
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    /// Unique identifier (e.g., "lesson1-vowels")
    pub id: String,
    /// Display title
    pub title: String,
    /// Difficulty category this lesson belongs to
    pub category: Category,
    /// Short description shown on lesson cards
    #[serde(default)]
    pub description: String,
    /// Lesson kind marker; only "fallback" is significant
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Declared item count (display only; the teaching sequence is authoritative)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<usize>,
    /// Human-readable estimated time (e.g., "10 minutes")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    /// Ordered instructional content
    pub teaching_content: Vec<TeachingItem>,
    /// Ordered multiple-choice quiz
    #[serde(default)]
    pub quiz_questions: Vec<QuizQuestion>,
}

impl Lesson {
    /// Whether this record was synthesized because the real lesson could
    /// not be loaded
    pub fn is_fallback(&self) -> bool {
        self.kind.as_deref() == Some(FALLBACK_KIND)
    }

    /// Number of teaching items, preferring the actual sequence length
    pub fn item_count(&self) -> usize {
        if self.teaching_content.is_empty() {
            self.total_items.unwrap_or(0)
        } else {
            self.teaching_content.len()
        }
    }

    /// Estimated time label, with a default for lessons that omit it
    pub fn estimated_time_label(&self) -> &str {
        self.estimated_time.as_deref().unwrap_or("10 min")
    }
}

/// One screen's worth of instructional content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeachingItem {
    /// Bengali script text (always present)
    pub bengali: String,
    /// English translation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    /// Phonetic spelling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    /// Pronunciation guidance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation_guide: Option<String>,
    /// Study tip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_tip: Option<String>,
    /// Numeric value, for number lessons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<i64>,
}

/// A multiple-choice quiz question
///
/// Options are positional: the index of an option is its identity, and
/// `correct_answer` refers to that index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Prompt text
    pub question: String,
    /// Bengali substring of the prompt to highlight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bengali_focus: Option<String>,
    /// Phonetic reading shown next to the highlighted substring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic_focus: Option<String>,
    /// Ordered answer options
    pub options: Vec<String>,
    /// Zero-based index of the correct option
    pub correct_answer: usize,
    /// Explanation shown with answer feedback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuizQuestion {
    /// Check whether the given option index is the correct answer
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "lesson1-vowels",
            "title": "Vowels",
            "category": "beginner",
            "description": "The independent vowel letters",
            "total_items": 2,
            "estimated_time": "10 minutes",
            "teaching_content": [
                {"bengali": "অ", "english": "a", "phonetic": "ô"},
                {"bengali": "আ", "english": "aa", "phonetic": "a", "audio_tip": "Open your mouth wide"}
            ],
            "quiz_questions": [
                {
                    "question": "Which letter is অ?",
                    "bengali_focus": "অ",
                    "phonetic_focus": "ô",
                    "options": ["a", "aa", "i", "u"],
                    "correct_answer": 0,
                    "explanation": "অ is the first vowel."
                }
            ]
        }"#
    }

    #[test]
    fn lesson_deserializes_from_wire_format() {
        let lesson: Lesson = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(lesson.id, "lesson1-vowels");
        assert_eq!(lesson.category, Category::Beginner);
        assert_eq!(lesson.teaching_content.len(), 2);
        assert_eq!(lesson.quiz_questions[0].correct_answer, 0);
        assert!(!lesson.is_fallback());
    }

    #[test]
    fn lesson_missing_required_field_fails() {
        // No teaching_content
        let json = r#"{"id": "x", "title": "X", "category": "beginner"}"#;
        assert!(serde_json::from_str::<Lesson>(json).is_err());
    }

    #[test]
    fn optional_fields_default() {
        let json = r#"{
            "id": "x",
            "title": "X",
            "category": "advanced",
            "teaching_content": [{"bengali": "ক"}]
        }"#;
        let lesson: Lesson = serde_json::from_str(json).unwrap();
        assert_eq!(lesson.description, "");
        assert!(lesson.kind.is_none());
        assert!(lesson.quiz_questions.is_empty());
        assert_eq!(lesson.estimated_time_label(), "10 min");
    }

    #[test]
    fn fallback_kind_is_detected() {
        let json = r#"{
            "id": "x",
            "title": "X",
            "category": "beginner",
            "type": "fallback",
            "teaching_content": [{"bengali": "ত্রুটি"}]
        }"#;
        let lesson: Lesson = serde_json::from_str(json).unwrap();
        assert!(lesson.is_fallback());
    }

    #[test]
    fn item_count_prefers_sequence_length() {
        let mut lesson: Lesson = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(lesson.item_count(), 2);

        lesson.total_items = Some(99);
        assert_eq!(lesson.item_count(), 2);

        lesson.teaching_content.clear();
        assert_eq!(lesson.item_count(), 99);
    }

    #[test]
    fn question_correctness_is_positional() {
        let lesson: Lesson = serde_json::from_str(sample_json()).unwrap();
        let question = &lesson.quiz_questions[0];
        assert!(question.is_correct(0));
        assert!(!question.is_correct(1));
        assert!(!question.is_correct(99));
    }
}
