//! Category screen: the lesson list

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::layout;
use crate::app::state::AppState;
use crate::lesson::{Lesson, catalog};
use crate::progress::ProgressTracker;
use crate::storage::Storage;
use crate::theme::Theme;

/// Lines for one lesson card
pub fn lesson_card_lines(
    lesson: &Lesson,
    completed: bool,
    selected: bool,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let marker = if selected { "▸ " } else { "  " };
    let check = if completed { "✓ " } else { "  " };

    let title_style = if selected {
        Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
    } else if completed {
        Style::default().fg(theme.success)
    } else {
        Style::default().fg(theme.fg_primary)
    };

    let line_style =
        if selected { Style::default().bg(theme.selection) } else { Style::default() };

    vec![
        Line::from(vec![
            Span::styled(marker.to_string(), title_style),
            Span::styled(check.to_string(), Style::default().fg(theme.success)),
            Span::styled(lesson.title.clone(), title_style),
            Span::styled(
                format!("    {} items · {}", lesson.item_count(), lesson.estimated_time_label()),
                Style::default().fg(theme.fg_muted),
            ),
        ])
        .style(line_style),
        Line::from(Span::styled(
            format!("      {}", lesson.description),
            Style::default().fg(theme.fg_muted),
        )),
    ]
}

/// Draw the category screen
pub fn draw<S: Storage>(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    progress: &ProgressTracker<S>,
    theme: &Theme,
) {
    let category_title = state
        .nav
        .category
        .map(|category| catalog::category_info(category).title)
        .unwrap_or_default();

    let mut lines =
        vec![layout::breadcrumb_line(&["Home", category_title], theme), Line::from("")];

    if state.category.lessons.is_empty() {
        lines.push(Line::from(Span::styled(
            "No lessons available for this category yet.",
            Style::default().fg(theme.fg_muted),
        )));
    }

    for (i, lesson) in state.category.lessons.iter().enumerate() {
        let selected = i == state.category.selected;
        lines.extend(lesson_card_lines(lesson, progress.is_completed(&lesson.id), selected, theme));
    }

    let block = Block::default()
        .title(format!(" {category_title} Lessons "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::Category;

    fn lesson() -> Lesson {
        serde_json::from_str(
            r#"{
                "id": "lesson1-vowels",
                "title": "Vowels",
                "category": "beginner",
                "description": "The independent vowel letters",
                "estimated_time": "10 minutes",
                "teaching_content": [{"bengali": "অ"}]
            }"#,
        )
        .unwrap()
    }

    fn plain(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| {
                line.spans.iter().map(|span| span.content.as_ref()).collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn card_shows_title_and_meta() {
        let lesson = lesson();
        assert_eq!(lesson.category, Category::Beginner);

        let text = plain(&lesson_card_lines(&lesson, false, false, &Theme::default()));
        assert!(text.contains("Vowels"));
        assert!(text.contains("1 items · 10 minutes"));
        assert!(!text.contains('✓'));
    }

    #[test]
    fn completed_lesson_is_checked() {
        let text = plain(&lesson_card_lines(&lesson(), true, false, &Theme::default()));
        assert!(text.contains('✓'));
    }
}
