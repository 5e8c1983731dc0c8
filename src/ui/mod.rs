//! UI rendering components
//!
//! Each screen module exposes pure line-builders (testable without a
//! terminal) plus a `draw` wrapper binding them to a frame.

pub mod category;
pub mod home;
pub mod layout;
pub mod maze;
pub mod quiz;
pub mod teaching;

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::app::state::{AppState, QuizView, Screen};
use crate::progress::ProgressTracker;
use crate::storage::Storage;
use crate::theme::Theme;

/// Main draw function
pub fn draw<S: Storage>(
    frame: &mut Frame,
    state: &AppState,
    progress: &ProgressTracker<S>,
    theme: &Theme,
) {
    let [main, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    match state.nav.screen {
        Screen::Home => home::draw(frame, main, state, progress, theme),
        Screen::Category => category::draw(frame, main, state, progress, theme),
        Screen::Teaching => teaching::draw(frame, main, state, theme),
        Screen::Quiz => match &state.quiz {
            Some(QuizView::Maze(_)) => maze::draw(frame, main, state, theme),
            _ => quiz::draw(frame, main, state, theme),
        },
    }

    // The loading overlay sits above whichever screen is current and is
    // never itself a navigation destination.
    if let Some(message) = &state.loading {
        layout::draw_loading(frame, main, message, theme);
    }

    layout::draw_footer(frame, footer, state, theme);
}
