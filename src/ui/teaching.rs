//! Teaching screen: one item of lesson content at a time

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::layout;
use crate::app::state::AppState;
use crate::lesson::{TeachingItem, catalog};
use crate::progress::percent_complete;
use crate::theme::Theme;

/// Lines for one teaching card
pub fn teaching_card_lines(item: &TeachingItem, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            item.bengali.clone(),
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
    ];

    if let Some(english) = &item.english {
        lines.push(Line::from(Span::styled(
            english.clone(),
            Style::default().fg(theme.fg_primary),
        )));
    }

    if let Some(phonetic) = &item.phonetic {
        lines.push(Line::from(Span::styled(
            format!("({phonetic})"),
            Style::default().fg(theme.accent_secondary),
        )));
    }

    lines.push(Line::from(""));

    if let Some(guide) = &item.pronunciation_guide {
        lines.push(Line::from(Span::styled(
            format!("Pronunciation: {guide}"),
            Style::default().fg(theme.fg_secondary),
        )));
    }

    if let Some(tip) = &item.audio_tip {
        lines.push(Line::from(Span::styled(
            format!("Tip: {tip}"),
            Style::default().fg(theme.fg_muted),
        )));
    }

    if let Some(number) = item.number {
        lines.push(Line::from(Span::styled(
            format!("Number: {number}"),
            Style::default().fg(theme.fg_secondary),
        )));
    }

    lines
}

/// Draw the teaching screen
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(lesson) = &state.lesson else {
        tracing::warn!("teaching screen drawn with no lesson loaded");
        return;
    };

    let category_title = state
        .nav
        .category
        .map(|category| catalog::category_info(category).title)
        .unwrap_or_default();

    let mut lines = vec![
        layout::breadcrumb_line(&["Home", category_title, &lesson.title], theme),
        Line::from(""),
    ];

    let total = lesson.teaching_content.len();
    let index = state.teaching.index.min(total.saturating_sub(1));

    if let Some(item) = lesson.teaching_content.get(index) {
        lines.extend(teaching_card_lines(item, theme));
    } else {
        lines.push(Line::from(Span::styled(
            "This lesson has no content.",
            Style::default().fg(theme.fg_muted),
        )));
    }

    lines.push(Line::from(""));

    // Position within the sequence
    let percent = percent_complete(index + 1, total);
    lines.push(Line::from(vec![
        Span::styled(
            layout::progress_bar(percent, 24),
            Style::default().fg(theme.accent_secondary),
        ),
        Span::styled(
            format!(" {} / {}", index + 1, total.max(1)),
            Style::default().fg(theme.fg_secondary),
        ),
    ]));

    let block = Block::default()
        .title(format!(" {} ", lesson.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn card_shows_all_present_fields() {
        let item = TeachingItem {
            bengali: "এক".to_string(),
            english: Some("One".to_string()),
            phonetic: Some("Êk".to_string()),
            pronunciation_guide: Some("Like 'eck'".to_string()),
            audio_tip: Some("Short and crisp".to_string()),
            number: Some(1),
        };

        let text = plain(&teaching_card_lines(&item, &Theme::default()));
        assert!(text.contains("এক"));
        assert!(text.contains("One"));
        assert!(text.contains("(Êk)"));
        assert!(text.contains("Pronunciation: Like 'eck'"));
        assert!(text.contains("Tip: Short and crisp"));
        assert!(text.contains("Number: 1"));
    }

    #[test]
    fn card_omits_absent_fields() {
        let item = TeachingItem {
            bengali: "অ".to_string(),
            english: None,
            phonetic: None,
            pronunciation_guide: None,
            audio_tip: None,
            number: None,
        };

        let text = plain(&teaching_card_lines(&item, &Theme::default()));
        assert!(text.contains("অ"));
        assert!(!text.contains("Pronunciation:"));
        assert!(!text.contains("Tip:"));
        assert!(!text.contains("Number:"));
    }
}
