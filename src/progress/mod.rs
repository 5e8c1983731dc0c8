//! Learner progress tracking
//!
//! The completed-lesson set is the single source of truth. Per-category
//! counters are a derived cache: they are recomputed from scratch against
//! the catalog tables on every change and on load, never patched
//! incrementally, so they cannot drift. Both are persisted as whole
//! snapshots, but the stored counters are only written for inspection and
//! are never trusted back.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::lesson::catalog::{self, Category};
use crate::storage::Storage;

/// Storage key for the completed lesson id list
pub const COMPLETED_LESSONS_KEY: &str = "completed_lessons";
/// Storage key for the derived per-category counters
pub const PROGRESS_KEY: &str = "progress";

/// Completion counters for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProgress {
    /// Lessons completed in this category
    pub completed: usize,
    /// Lessons the category contains
    pub total: usize,
}

/// Completion percentage, rounded; zero when there is nothing to complete
pub fn percent_complete(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

/// Tracks completed lessons and derived category progress
pub struct ProgressTracker<S> {
    storage: S,
    /// Append-only list of completed lesson ids, no duplicates
    completed: Vec<String>,
    /// Derived counters, one entry per category
    progress: BTreeMap<Category, CategoryProgress>,
}

impl<S: Storage> ProgressTracker<S> {
    /// Load progress from storage
    ///
    /// Unknown and duplicate ids are dropped, and the counters are rebuilt
    /// from the completed set; a stored counter snapshot is ignored.
    pub fn load(storage: S) -> Result<Self> {
        let completed = match storage.get(COMPLETED_LESSONS_KEY)? {
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => ids,
                Err(err) => {
                    tracing::warn!("discarding unreadable completed-lesson list: {err}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let mut seen = Vec::with_capacity(completed.len());
        for id in completed {
            if catalog::category_of_lesson(&id).is_none() {
                tracing::warn!("dropping completed lesson not in any category: {id}");
            } else if !seen.contains(&id) {
                seen.push(id);
            }
        }

        let mut tracker = Self { storage, completed: seen, progress: BTreeMap::new() };
        tracker.recompute();
        Ok(tracker)
    }

    /// Completed lesson ids, in completion order
    pub fn completed_lessons(&self) -> &[String] {
        &self.completed
    }

    /// Whether a lesson has been completed
    pub fn is_completed(&self, lesson_id: &str) -> bool {
        self.completed.iter().any(|id| id == lesson_id)
    }

    /// Counters for one category
    pub fn category(&self, category: Category) -> CategoryProgress {
        self.progress.get(&category).copied().unwrap_or_default()
    }

    /// Completion percentage for one category
    pub fn percent(&self, category: Category) -> u8 {
        let progress = self.category(category);
        percent_complete(progress.completed, progress.total)
    }

    /// Record a lesson as completed and persist
    ///
    /// Idempotent: recording an already-completed lesson changes nothing
    /// and returns `Ok(false)`. Ids outside the catalog are ignored.
    pub fn mark_completed(&mut self, lesson_id: &str) -> Result<bool> {
        if catalog::category_of_lesson(lesson_id).is_none() {
            tracing::warn!("ignoring completion of unknown lesson: {lesson_id}");
            return Ok(false);
        }
        if self.is_completed(lesson_id) {
            return Ok(false);
        }

        self.completed.push(lesson_id.to_string());
        self.recompute();
        self.persist()?;
        Ok(true)
    }

    /// Rebuild every category counter from the completed set
    pub fn recompute(&mut self) {
        for category in Category::ALL {
            let ids = catalog::lesson_ids(category);
            let completed = ids.iter().filter(|id| self.is_completed(id)).count();
            self.progress.insert(category, CategoryProgress { completed, total: ids.len() });
        }
    }

    /// Clear all progress and remove the persisted snapshots
    pub fn reset(&mut self) -> Result<()> {
        self.completed.clear();
        self.recompute();
        self.storage.remove(COMPLETED_LESSONS_KEY)?;
        self.storage.remove(PROGRESS_KEY)?;
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        let completed = serde_json::to_string(&self.completed)
            .with_context(|| "Failed to serialize completed lessons")?;
        self.storage.put(COMPLETED_LESSONS_KEY, completed)?;

        let progress = serde_json::to_string(&self.progress)
            .with_context(|| "Failed to serialize progress")?;
        self.storage.put(PROGRESS_KEY, progress)?;

        Ok(())
    }

    /// Give the underlying storage back
    pub fn into_storage(self) -> S {
        self.storage
    }
}
