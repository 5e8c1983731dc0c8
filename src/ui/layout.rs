//! Shared layout helpers

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::state::{AppState, QuizView, Screen, StatusLine};
use crate::quiz::QuestionSession;
use crate::theme::Theme;

/// Create a centered rectangle with the given percentage of width and height
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Join non-empty breadcrumb parts with a separator
pub fn breadcrumb(parts: &[&str]) -> String {
    parts.iter().filter(|part| !part.is_empty()).copied().collect::<Vec<_>>().join(" > ")
}

/// A fixed-width textual progress bar
pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (percent as usize * width) / 100;
    let mut bar = String::with_capacity(width * 3);
    for i in 0..width {
        bar.push(if i < filled { '█' } else { '░' });
    }
    bar
}

/// Breadcrumb line for the top of a screen
pub fn breadcrumb_line(parts: &[&str], theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(breadcrumb(parts), Style::default().fg(theme.fg_muted)))
}

/// Draw the loading overlay over the current screen
pub fn draw_loading(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let overlay = centered_rect(50, 20, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let para = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(theme.fg_primary))),
    ])
    .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(para, inner);
}

/// Key hints for the footer, by screen and quiz phase
fn footer_hint(state: &AppState) -> &'static str {
    match state.nav.screen {
        Screen::Home => "[j/k] Select    [Enter] Open    [q] Quit",
        Screen::Category => "[j/k] Select    [Enter] Open Lesson    [Esc] Back",
        Screen::Teaching => {
            let len = state.lesson.as_ref().map_or(0, |l| l.teaching_content.len());
            if state.teaching.on_last(len) {
                "[h] Previous    [Enter] Start Quiz    [Esc] Back"
            } else {
                "[h/l] Previous/Next    [Esc] Back"
            }
        }
        Screen::Quiz => match &state.quiz {
            Some(QuizView::Attempt(attempt)) => {
                if attempt.is_complete() {
                    "[r] Retake Quiz    [g] Maze Game    [Enter] Back to Lessons"
                } else if attempt.in_feedback() {
                    "[Enter] Continue"
                } else {
                    "[1-4] Answer    [j/k + Enter] Select    [Esc] Back"
                }
            }
            Some(QuizView::Maze(game)) => {
                if game.is_complete() && game.feedback().is_none() {
                    "[r] Play Again    [Enter] Back to Lessons"
                } else if game.feedback().is_some() {
                    ""
                } else {
                    "[1-4] Answer    [j/k + Enter] Select    [Esc] Back"
                }
            }
            None => "[Esc] Back",
        },
    }
}

/// Draw the one-line footer: status message if set, key hints otherwise
pub fn draw_footer(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let StatusLine { message, is_error } = &state.status;

    let line = match message {
        Some(msg) => {
            let color = if *is_error { theme.error } else { theme.warning };
            Line::from(Span::styled(format!(" {msg}"), Style::default().fg(color)))
        }
        None => Line::from(Span::styled(
            format!(" {}", footer_hint(state)),
            Style::default().fg(theme.fg_muted),
        )),
    };

    let para = Paragraph::new(line).style(Style::default().bg(theme.bg_secondary));
    frame.render_widget(para, area);
}
