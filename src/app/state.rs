//! Application state definitions

use std::time::Instant;

use crate::lesson::{Category, Lesson};
use crate::quiz::QuizAttempt;
use crate::quiz::maze::MazeGame;

/// Which screen is currently displayed
///
/// The loading overlay is not a screen: it is drawn over whatever is
/// current and never enters the history stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Home,
    Category,
    Teaching,
    Quiz,
}

/// A point in navigation history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub screen: Screen,
    pub category: Option<Category>,
    pub lesson: Option<String>,
}

/// Screen routing state with a bounded history stack
///
/// Forward navigation records an entry; going back restores the previous
/// entry's fields without reloading any data.
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    /// Visible screen
    pub screen: Screen,
    /// Category the current screen refers to
    pub category: Option<Category>,
    /// Lesson id the current screen refers to
    pub lesson: Option<String>,
    /// Visited entries, oldest first
    history: Vec<NavEntry>,
}

impl NavigationState {
    /// Oldest entries are dropped beyond this many
    pub const MAX_HISTORY: usize = 10;

    /// Move forward to a new navigation point
    pub fn visit(&mut self, screen: Screen, category: Option<Category>, lesson: Option<String>) {
        self.screen = screen;
        self.category = category;
        self.lesson = lesson;

        self.history.push(NavEntry {
            screen,
            category: self.category,
            lesson: self.lesson.clone(),
        });
        if self.history.len() > Self::MAX_HISTORY {
            self.history.remove(0);
        }
    }

    /// Step back to the previous entry, restoring its fields
    ///
    /// Returns `None` when there is nowhere to go back to.
    pub fn back(&mut self) -> Option<NavEntry> {
        if self.history.len() < 2 {
            return None;
        }
        self.history.pop();
        let previous = self.history.last().cloned()?;

        self.screen = previous.screen;
        self.category = previous.category;
        self.lesson = previous.lesson.clone();
        Some(previous)
    }

    /// Number of recorded entries
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

/// Cursor over the home screen's category cards
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeState {
    pub selected: usize,
}

/// Loaded lesson list for the category screen
#[derive(Debug, Clone, Default)]
pub struct CategoryState {
    /// Lessons shown, in catalog order
    pub lessons: Vec<Lesson>,
    /// Selected lesson index
    pub selected: usize,
}

/// Cursor over a lesson's teaching sequence
#[derive(Debug, Clone, Copy, Default)]
pub struct TeachingState {
    pub index: usize,
}

impl TeachingState {
    /// Move forward one item, stopping at the end
    pub fn next(&mut self, len: usize) {
        if len > 0 && self.index + 1 < len {
            self.index += 1;
        }
    }

    /// Move back one item, stopping at the start
    pub fn previous(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        }
    }

    /// Whether the cursor is on the final item
    pub fn on_last(&self, len: usize) -> bool {
        len == 0 || self.index + 1 >= len
    }
}

/// Which presentation the quiz screen is running
#[derive(Debug, Clone)]
pub enum QuizView {
    /// The linear question-by-question quiz
    Attempt(QuizAttempt),
    /// The maze minigame over the same questions
    Maze(MazeGame),
}

/// One-line status message shown in the footer
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    /// Message to display (when set)
    pub message: Option<String>,
    /// Whether the message is an error
    pub is_error: bool,
}

impl StatusLine {
    /// Set an informational message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    /// Clear the message
    pub fn clear(&mut self) {
        self.message = None;
        self.is_error = false;
    }
}

/// What a pending delayed continuation should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingKind {
    /// Clear maze feedback and present the next question
    MazeNextQuestion,
    /// Clear maze feedback and present the results
    MazeFinish,
}

/// A delayed continuation, valid only for the generation that scheduled it
///
/// Navigating away bumps the generation, so a timer scheduled on an
/// earlier screen can never apply its effect to a later one.
#[derive(Debug, Clone, Copy)]
pub struct PendingAction {
    /// When the continuation should run
    pub due: Instant,
    /// Generation captured at schedule time
    pub generation: u64,
    /// Effect to apply
    pub kind: PendingKind,
}

/// Full application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Routing state
    pub nav: NavigationState,

    /// Loading overlay message, drawn over the current screen
    pub loading: Option<String>,

    /// Home screen cursor
    pub home: HomeState,

    /// Category screen contents
    pub category: CategoryState,

    /// Lesson backing the teaching and quiz screens
    pub lesson: Option<Lesson>,

    /// Teaching sequence cursor
    pub teaching: TeachingState,

    /// Active quiz presentation, if any
    pub quiz: Option<QuizView>,

    /// Cursor over the current question's options
    pub option_cursor: usize,

    /// Footer status message
    pub status: StatusLine,

    /// Navigation generation, bumped on every transition
    pub generation: u64,

    /// Delayed continuation awaiting its due time
    pub pending: Option<PendingAction>,
}

impl AppState {
    /// Invalidate timers scheduled on the previous screen
    pub fn bump_generation(&mut self) {
        self.generation += 1;
        self.pending = None;
    }
}
