//! Application state and event handling

pub mod input;
pub mod state;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::Config;
use crate::lesson::catalog;
use crate::lesson::{Category, LessonStore};
use crate::progress::ProgressTracker;
use crate::quiz::maze::{self, MazeGame};
use crate::quiz::{QuestionSession, QuizAttempt, QuizStep};
use crate::storage::FileStorage;
use crate::theme::Theme;
use crate::ui;
use input::Action;
use state::{AppState, CategoryState, PendingAction, PendingKind, QuizView, Screen, TeachingState};

/// The main application
pub struct App {
    /// Active theme
    theme: Theme,

    /// Lesson fetching and caching
    store: LessonStore,

    /// Persisted learner progress
    progress: ProgressTracker<FileStorage>,

    /// Current application state
    state: AppState,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Result<Self> {
        let storage = FileStorage::new(Config::storage_dir()?)?;
        let progress = ProgressTracker::load(storage)?;
        let store = LessonStore::new(config.lesson_source.clone());
        let theme = config.active_theme();
        let terminal = Self::setup_terminal()?;

        Ok(Self { theme, store, progress, state: AppState::default(), terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        self.go_home();

        loop {
            self.draw()?;

            // Handle events
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        match self.handle_key(key.code).await {
                            Ok(true) => break, // Exit requested
                            Ok(false) => {}    // Continue
                            Err(e) => {
                                tracing::error!("Error handling key: {}", e);
                                self.state.status.set_error(format!("Error: {e}"));
                            }
                        }
                    }
                }
            }

            self.apply_due_pending();
        }

        self.restore_terminal()?;
        Ok(())
    }

    /// Draw the current state
    fn draw(&mut self) -> Result<()> {
        self.terminal.draw(|frame| {
            ui::draw(frame, &self.state, &self.progress, &self.theme);
        })?;
        Ok(())
    }

    /// Handle a key press, returns true if should exit
    async fn handle_key(&mut self, key: KeyCode) -> Result<bool> {
        let Some(action) = input::key_to_action(key) else {
            return Ok(false);
        };

        // A fresh key dismisses the previous status message
        self.state.status.clear();

        match action {
            Action::Quit => return Ok(true),
            Action::Back => {
                self.go_back();
                return Ok(false);
            }
            _ => {}
        }

        match self.state.nav.screen {
            Screen::Home => self.handle_home(action).await?,
            Screen::Category => self.handle_category(action).await?,
            Screen::Teaching => self.handle_teaching(action)?,
            Screen::Quiz => self.handle_quiz(action).await?,
        }

        Ok(false)
    }

    /// Home screen: pick a category
    async fn handle_home(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Up => {
                self.state.home.selected = self.state.home.selected.saturating_sub(1);
            }
            Action::Down => {
                self.state.home.selected =
                    (self.state.home.selected + 1).min(Category::ALL.len() - 1);
            }
            Action::Select => {
                let category = Category::ALL[self.state.home.selected];
                if catalog::category_info(category).total_lessons > 0 {
                    self.go_to_category(category).await?;
                } else {
                    self.state
                        .status
                        .set_message("This category is coming soon! Please try the Beginner category.");
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Category screen: pick a lesson
    async fn handle_category(&mut self, action: Action) -> Result<()> {
        let count = self.state.category.lessons.len();
        match action {
            Action::Up => {
                self.state.category.selected = self.state.category.selected.saturating_sub(1);
            }
            Action::Down if count > 0 => {
                self.state.category.selected = (self.state.category.selected + 1).min(count - 1);
            }
            Action::Select => {
                let picked = self
                    .state
                    .category
                    .lessons
                    .get(self.state.category.selected)
                    .map(|lesson| (lesson.category, lesson.id.clone()));
                if let Some((category, id)) = picked {
                    self.go_to_lesson(category, id).await?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Teaching screen: page through the lesson content
    fn handle_teaching(&mut self, action: Action) -> Result<()> {
        let len = self.state.lesson.as_ref().map_or(0, |l| l.teaching_content.len());
        match action {
            Action::Left => self.state.teaching.previous(),
            Action::Right => self.state.teaching.next(len),
            Action::Select => {
                // The quiz affordance replaces "next" on the final item
                if self.state.teaching.on_last(len) {
                    self.go_to_quiz();
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Quiz screen: answer questions, page feedback, route from results
    async fn handle_quiz(&mut self, action: Action) -> Result<()> {
        /// Routing decided while the quiz view is mutably borrowed
        enum After {
            Nothing,
            BackToLessons,
            RestartQuiz,
            StartMaze,
            QuizFinished,
        }
        let mut after = After::Nothing;

        match self.state.quiz.as_mut() {
            Some(QuizView::Attempt(attempt)) => {
                if attempt.is_complete() {
                    match action {
                        Action::Retake => after = After::RestartQuiz,
                        Action::PlayMaze => after = After::StartMaze,
                        Action::Select => after = After::BackToLessons,
                        _ => {}
                    }
                } else if attempt.in_feedback() {
                    if action == Action::Select {
                        self.state.option_cursor = 0;
                        if attempt.advance() == QuizStep::Finished {
                            after = After::QuizFinished;
                        }
                    }
                } else {
                    let options = attempt.current_question().map_or(0, |q| q.options.len());
                    match action {
                        Action::Up => {
                            self.state.option_cursor = self.state.option_cursor.saturating_sub(1);
                        }
                        Action::Down if options > 0 => {
                            self.state.option_cursor =
                                (self.state.option_cursor + 1).min(options - 1);
                        }
                        Action::Select => {
                            attempt.answer(self.state.option_cursor);
                        }
                        Action::Option(i) => {
                            attempt.answer(i);
                        }
                        _ => {}
                    }
                }
            }
            Some(QuizView::Maze(game)) => {
                if game.feedback().is_some() {
                    // Options are locked while feedback is showing
                } else if game.is_complete() {
                    match action {
                        Action::Retake | Action::PlayMaze => after = After::StartMaze,
                        Action::Select => after = After::BackToLessons,
                        _ => {}
                    }
                } else {
                    let options = game.current_question().map_or(0, |q| q.options.len());
                    let answered = match action {
                        Action::Up => {
                            self.state.option_cursor = self.state.option_cursor.saturating_sub(1);
                            None
                        }
                        Action::Down if options > 0 => {
                            self.state.option_cursor =
                                (self.state.option_cursor + 1).min(options - 1);
                            None
                        }
                        Action::Select => game.answer(self.state.option_cursor),
                        Action::Option(i) => game.answer(i),
                        _ => None,
                    };

                    if answered.is_some() {
                        let (kind, delay_ms) = if game.is_complete() {
                            (PendingKind::MazeFinish, maze::END_DELAY_MS)
                        } else {
                            (PendingKind::MazeNextQuestion, maze::NEXT_DELAY_MS)
                        };
                        self.state.pending = Some(PendingAction {
                            due: Instant::now() + Duration::from_millis(delay_ms),
                            generation: self.state.generation,
                            kind,
                        });
                    }
                }
            }
            None => {
                tracing::warn!("quiz action received with no active quiz");
            }
        }

        match after {
            After::Nothing => {}
            After::BackToLessons => {
                if let Some(category) = self.state.nav.category {
                    self.go_to_category(category).await?;
                } else {
                    self.go_home();
                }
            }
            After::RestartQuiz => self.go_to_quiz_restart(),
            After::StartMaze => self.start_maze(),
            After::QuizFinished => self.on_quiz_finished()?,
        }
        Ok(())
    }

    /// Record completion and persist once an attempt finishes
    fn on_quiz_finished(&mut self) -> Result<()> {
        let Some(QuizView::Attempt(attempt)) = &self.state.quiz else {
            return Ok(());
        };
        let summary = attempt.summary();
        let Some(lesson_id) = self.state.lesson.as_ref().map(|l| l.id.clone()) else {
            tracing::warn!("quiz finished with no lesson loaded");
            return Ok(());
        };

        if summary.passed {
            match self.progress.mark_completed(&lesson_id) {
                Ok(true) => tracing::info!("lesson completed: {lesson_id}"),
                Ok(false) => {}
                Err(err) => {
                    tracing::error!("failed to persist progress: {err}");
                    self.state.status.set_error("Could not save your progress.");
                }
            }
        }
        Ok(())
    }

    /// Apply a delayed continuation once due, unless navigation outdated it
    fn apply_due_pending(&mut self) {
        let Some(pending) = self.state.pending else {
            return;
        };
        if pending.generation != self.state.generation {
            // Scheduled on a screen we have since left
            self.state.pending = None;
            return;
        }
        if Instant::now() < pending.due {
            return;
        }
        self.state.pending = None;

        match pending.kind {
            PendingKind::MazeNextQuestion | PendingKind::MazeFinish => {
                if let Some(QuizView::Maze(game)) = self.state.quiz.as_mut() {
                    game.clear_feedback();
                    self.state.option_cursor = 0;
                } else {
                    tracing::warn!("maze continuation fired with no maze active");
                }
            }
        }
    }

    // --- Navigation ------------------------------------------------------

    /// Navigate to the home screen
    fn go_home(&mut self) {
        self.state.bump_generation();
        self.state.nav.visit(Screen::Home, None, None);
    }

    /// Navigate to a category's lesson list and load it
    async fn go_to_category(&mut self, category: Category) -> Result<()> {
        self.state.bump_generation();
        self.state.nav.visit(Screen::Category, Some(category), None);

        self.show_loading(format!("Loading {category} lessons..."))?;
        let lessons = self.store.load_category_lessons(category).await;
        self.state.loading = None;

        self.state.category = CategoryState { lessons, selected: 0 };
        Ok(())
    }

    /// Navigate to a lesson's teaching screen and load the lesson
    async fn go_to_lesson(&mut self, category: Category, id: String) -> Result<()> {
        self.state.bump_generation();
        self.state.nav.visit(Screen::Teaching, Some(category), Some(id.clone()));

        self.show_loading("Loading lesson...")?;
        let lesson = self.store.load_lesson(category, &id).await;
        self.state.loading = None;

        if lesson.is_fallback() {
            self.state.status.set_error("Error loading lesson. Showing fallback content.");
        }
        self.state.teaching = TeachingState::default();
        self.state.lesson = Some(lesson);
        Ok(())
    }

    /// Navigate to the quiz for the current lesson
    fn go_to_quiz(&mut self) {
        let Some(lesson) = &self.state.lesson else {
            tracing::warn!("quiz requested with no lesson loaded");
            return;
        };
        if lesson.quiz_questions.is_empty() {
            self.state.status.set_message("No quiz available for this lesson.");
            return;
        }
        let questions = lesson.quiz_questions.clone();
        let category = lesson.category;
        let id = lesson.id.clone();

        self.state.bump_generation();
        self.state.nav.visit(Screen::Quiz, Some(category), Some(id));
        self.state.quiz = Some(QuizView::Attempt(QuizAttempt::new(questions)));
        self.state.option_cursor = 0;
    }

    /// Start a fresh attempt over the same lesson (no navigation)
    fn go_to_quiz_restart(&mut self) {
        let Some(questions) = self.state.lesson.as_ref().map(|l| l.quiz_questions.clone()) else {
            return;
        };
        self.state.bump_generation();
        self.state.quiz = Some(QuizView::Attempt(QuizAttempt::new(questions)));
        self.state.option_cursor = 0;
    }

    /// Swap the quiz screen over to the maze presentation
    fn start_maze(&mut self) {
        let Some(questions) = self.state.lesson.as_ref().map(|l| l.quiz_questions.clone()) else {
            return;
        };
        if questions.is_empty() {
            self.state.status.set_message("No quiz available for this lesson.");
            return;
        }
        self.state.bump_generation();
        self.state.quiz = Some(QuizView::Maze(MazeGame::new(questions, &mut rand::rng())));
        self.state.option_cursor = 0;
    }

    /// Step back in history, restoring the previous view without reloading
    fn go_back(&mut self) {
        self.state.bump_generation();
        if self.state.nav.back().is_none() {
            // Nowhere to go; home is always a safe landing
            self.state.nav.visit(Screen::Home, None, None);
        }
    }

    /// Put up the loading overlay and render it immediately
    fn show_loading(&mut self, msg: impl Into<String>) -> Result<()> {
        self.state.loading = Some(msg.into());
        self.draw()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
