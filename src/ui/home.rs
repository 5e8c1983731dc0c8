//! Home screen: category cards with progress

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::layout;
use crate::app::state::AppState;
use crate::lesson::catalog::{self, Category};
use crate::progress::ProgressTracker;
use crate::storage::Storage;
use crate::theme::Theme;

/// Script sample shown next to each category title
fn category_glyph(category: Category) -> &'static str {
    match category {
        Category::Beginner => "অ",
        Category::Intermediate => "শব্দ",
        Category::Advanced => "সাহিত্য",
    }
}

/// Lines for one category card
pub fn category_card_lines(
    category: Category,
    percent: u8,
    selected: bool,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let info = catalog::category_info(category);
    let available = info.total_lessons > 0;

    let marker = if selected { "▸ " } else { "  " };
    let title_style = if selected {
        Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD)
    };

    let lesson_count = if available {
        Span::styled(
            format!("{} Lessons", info.total_lessons),
            Style::default().fg(theme.fg_secondary),
        )
    } else {
        Span::styled("Coming Soon", Style::default().fg(theme.warning))
    };

    vec![
        Line::from(vec![
            Span::styled(marker.to_string(), title_style),
            Span::styled(format!("{}  ", category_glyph(category)), title_style),
            Span::styled(info.title.to_string(), title_style),
        ]),
        Line::from(Span::styled(
            format!("    {}", info.description),
            Style::default().fg(theme.fg_muted),
        )),
        Line::from(vec![
            Span::raw("    "),
            lesson_count,
            Span::raw("    "),
            Span::styled(
                layout::progress_bar(percent, 20),
                Style::default().fg(theme.accent_secondary),
            ),
            Span::styled(format!(" {percent}%"), Style::default().fg(theme.fg_secondary)),
        ]),
        Line::from(""),
    ]
}

/// Draw the home screen
pub fn draw<S: Storage>(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    progress: &ProgressTracker<S>,
    theme: &Theme,
) {
    let mut lines = vec![
        Line::from(Span::styled(
            "শিক্ষা  Learn Bengali",
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Pick a category to begin",
            Style::default().fg(theme.fg_muted),
        )),
        Line::from(""),
    ];

    for (i, category) in Category::ALL.into_iter().enumerate() {
        let selected = i == state.home.selected;
        lines.extend(category_card_lines(category, progress.percent(category), selected, theme));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(Paragraph::new(lines), inner);
}
