//! Maze screen: the minigame presentation of a quiz

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{layout, quiz};
use crate::app::state::{AppState, QuizView};
use crate::lesson::catalog;
use crate::quiz::QuestionSession;
use crate::quiz::maze::{COLS, MazeGame, ROWS};
use crate::theme::Theme;

/// Render the maze grid with player and exit markers
pub fn grid_lines(game: &MazeGame, theme: &Theme) -> Vec<Line<'static>> {
    let (px, py) = game.position();
    let exit = MazeGame::exit_cell();

    let mut lines = Vec::with_capacity(ROWS);
    for y in 0..ROWS {
        let mut spans = vec![Span::raw("  ")];
        for x in 0..COLS {
            let cell = y * COLS + x;
            let (glyph, style) = if (x, y) == (px, py) {
                ("◉", Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD))
            } else if cell == exit {
                ("⚑", Style::default().fg(theme.success))
            } else {
                ("·", Style::default().fg(theme.fg_muted))
            };
            spans.push(Span::styled(format!(" {glyph} "), style));
        }
        lines.push(Line::from(spans));
    }

    lines
}

/// Result message once the game is over
pub fn result_message(won: bool) -> &'static str {
    if won {
        "Congratulations! You escaped the maze!"
    } else {
        "So close! You ran out of questions. Try again!"
    }
}

/// Draw the maze screen
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(QuizView::Maze(game)) = &state.quiz else {
        tracing::warn!("maze screen drawn with no game active");
        return;
    };

    let category_title = state
        .nav
        .category
        .map(|category| catalog::category_info(category).title)
        .unwrap_or_default();
    let lesson_title = state.lesson.as_ref().map(|l| l.title.as_str()).unwrap_or_default();

    let mut lines = vec![
        layout::breadcrumb_line(&["Home", category_title, lesson_title, "Maze Game"], theme),
        Line::from(""),
    ];

    lines.extend(grid_lines(game, theme));
    lines.push(Line::from(""));

    let showing_results = game.is_complete() && game.feedback().is_none();

    if showing_results {
        let won = game.won().unwrap_or(false);
        lines.push(Line::from(Span::styled(
            result_message(won),
            Style::default()
                .fg(if won { theme.success } else { theme.warning })
                .add_modifier(Modifier::BOLD),
        )));
    } else if let Some(feedback) = game.feedback() {
        // Feedback pause: answered question stays up with marks
        if let Some(question) = game.feedback_question() {
            lines.extend(quiz::prompt_lines(question, theme));
            lines.push(Line::from(""));
            lines.extend(quiz::options_lines(
                question,
                None,
                Some((feedback.selected, feedback.correct)),
                theme,
            ));
        }
        lines.push(Line::from(Span::styled(
            feedback.message(),
            Style::default()
                .fg(if feedback.correct { theme.success } else { theme.error })
                .add_modifier(Modifier::BOLD),
        )));
    } else if let Some(question) = game.current_question() {
        lines.push(Line::from(Span::styled(
            format!(
                "Question {} of {}",
                game.questions_answered() + 1,
                game.questions_total()
            ),
            Style::default().fg(theme.fg_muted),
        )));
        lines.push(Line::from(""));
        lines.extend(quiz::prompt_lines(question, theme));
        lines.push(Line::from(""));
        lines.extend(quiz::options_lines(question, Some(state.option_cursor), None, theme));
    }

    let block = Block::default()
        .title(" Maze Game ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
