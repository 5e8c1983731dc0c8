//! Quiz screen: questions, answer feedback, and results

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::layout;
use crate::app::state::{AppState, QuizView};
use crate::lesson::{QuizQuestion, catalog};
use crate::progress::percent_complete;
use crate::quiz::{QuestionSession, QuizAttempt};
use crate::theme::Theme;

/// Prompt line, highlighting the focus pair when present
pub fn prompt_lines(question: &QuizQuestion, theme: &Theme) -> Vec<Line<'static>> {
    let base = Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD);

    if let (Some(focus), Some(phonetic)) = (&question.bengali_focus, &question.phonetic_focus) {
        if let Some(at) = question.question.find(focus.as_str()) {
            let before = question.question[..at].to_string();
            let after = question.question[at + focus.len()..].to_string();
            return vec![Line::from(vec![
                Span::styled(before, base),
                Span::styled(
                    focus.clone(),
                    Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" ({phonetic})"), Style::default().fg(theme.accent_secondary)),
                Span::styled(after, base),
            ])];
        }
    }

    vec![Line::from(Span::styled(question.question.clone(), base))]
}

/// Option list, with the cursor while answering and correctness marks after
///
/// `feedback` is the (selected index, was correct) pair once an answer has
/// been given; options are then shown locked.
pub fn options_lines(
    question: &QuizQuestion,
    cursor: Option<usize>,
    feedback: Option<(usize, bool)>,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (i, option) in question.options.iter().enumerate() {
        let letter = (b'A' + i as u8) as char;

        let (prefix, style) = match feedback {
            Some((selected, _)) => {
                if i == question.correct_answer {
                    ("✓", Style::default().fg(theme.success).add_modifier(Modifier::BOLD))
                } else if i == selected {
                    ("✗", Style::default().fg(theme.error))
                } else {
                    (" ", Style::default().fg(theme.fg_muted))
                }
            }
            None => {
                if cursor == Some(i) {
                    ("●", Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD))
                } else {
                    ("○", Style::default().fg(theme.fg_secondary))
                }
            }
        };

        lines.push(Line::from(Span::styled(format!("  {prefix} {letter}) {option}"), style)));
        lines.push(Line::from(""));
    }

    lines
}

/// Feedback block shown under the locked options
pub fn feedback_lines(question: &QuizQuestion, correct: bool, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if correct {
        lines.push(Line::from(Span::styled(
            "Correct!",
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Incorrect",
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        )));
    }

    if let Some(explanation) = &question.explanation {
        lines.push(Line::from(Span::styled(
            explanation.clone(),
            Style::default().fg(theme.fg_secondary),
        )));
    }

    lines
}

/// Results block for a finished attempt
pub fn results_lines(attempt: &QuizAttempt, theme: &Theme) -> Vec<Line<'static>> {
    let summary = attempt.summary();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{}/{}", summary.score, summary.total),
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{}%", summary.percent),
            Style::default().fg(theme.fg_secondary),
        )),
        Line::from(""),
        Line::from(Span::styled(
            summary.tier.message(),
            Style::default().fg(if summary.passed { theme.success } else { theme.warning }),
        )),
        Line::from(""),
    ];

    // Per-question markers
    let mut markers = vec![Span::raw("  ")];
    for record in attempt.answers() {
        let (mark, color) =
            if record.correct { ("✓", theme.success) } else { ("✗", theme.error) };
        markers.push(Span::styled(
            format!("Q{} {} ", record.question_index + 1, mark),
            Style::default().fg(color),
        ));
    }
    lines.push(Line::from(markers));

    lines
}

/// Draw the quiz screen (linear attempt presentation)
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(QuizView::Attempt(attempt)) = &state.quiz else {
        tracing::warn!("quiz screen drawn with no attempt active");
        return;
    };

    let category_title = state
        .nav
        .category
        .map(|category| catalog::category_info(category).title)
        .unwrap_or_default();
    let lesson_title = state.lesson.as_ref().map(|l| l.title.as_str()).unwrap_or_default();

    let mut lines = vec![
        layout::breadcrumb_line(&["Home", category_title, lesson_title, "Quiz"], theme),
        Line::from(""),
    ];

    let title = if attempt.is_complete() { " Quiz Results " } else { " Quiz " };

    if attempt.is_complete() {
        lines.extend(results_lines(attempt, theme));
    } else if let Some(question) = attempt.current_question() {
        let index = attempt.current_index();
        let total = attempt.total();

        lines.push(Line::from(Span::styled(
            format!("Question {} of {}", index + 1, total),
            Style::default().fg(theme.fg_muted),
        )));
        lines.push(Line::from(vec![
            Span::styled(
                layout::progress_bar(percent_complete(index + 1, total), 24),
                Style::default().fg(theme.accent_secondary),
            ),
        ]));
        lines.push(Line::from(""));

        lines.extend(prompt_lines(question, theme));
        lines.push(Line::from(""));

        if attempt.in_feedback() {
            let feedback = attempt.last_answer().map(|r| (r.selected, r.correct));
            lines.extend(options_lines(question, None, feedback, theme));
            if let Some(record) = attempt.last_answer() {
                lines.extend(feedback_lines(question, record.correct, theme));
            }
        } else {
            lines.extend(options_lines(question, Some(state.option_cursor), None, theme));
        }
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> QuizQuestion {
        QuizQuestion {
            question: "What sound does অ make?".to_string(),
            bengali_focus: Some("অ".to_string()),
            phonetic_focus: Some("ô".to_string()),
            options: vec!["ô".into(), "a".into(), "i".into()],
            correct_answer: 0,
            explanation: Some("অ is the inherent vowel.".to_string()),
        }
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
    fn prompt_includes_phonetic_focus() {
        let text = plain(&prompt_lines(&question(), &Theme::default()));
        assert!(text.contains("অ (ô)"));
    }

    #[test]
    fn prompt_without_focus_is_unchanged() {
        let mut q = question();
        q.bengali_focus = None;
        let text = plain(&prompt_lines(&q, &Theme::default()));
        assert_eq!(text.trim(), "What sound does অ make?");
    }

    #[test]
    fn options_show_cursor_while_answering() {
        let text = plain(&options_lines(&question(), Some(1), None, &Theme::default()));
        assert!(text.contains("● B) a"));
        assert!(text.contains("○ A) ô"));
    }

    #[test]
    fn options_mark_correct_and_wrong_after_answer() {
        // Selected B, which is wrong; A is correct
        let text = plain(&options_lines(&question(), None, Some((1, false)), &Theme::default()));
        assert!(text.contains("✓ A) ô"));
        assert!(text.contains("✗ B) a"));
    }

    #[test]
    fn feedback_includes_explanation() {
        let text = plain(&feedback_lines(&question(), false, &Theme::default()));
        assert!(text.contains("Incorrect"));
        assert!(text.contains("inherent vowel"));
    }

    #[test]
    fn results_show_score_percent_and_markers() {
        let mut attempt = QuizAttempt::new(vec![question(), question()]);
        attempt.answer(0);
        attempt.advance();
        attempt.answer(1);
        attempt.advance();

        let text = plain(&results_lines(&attempt, &Theme::default()));
        assert!(text.contains("1/2"));
        assert!(text.contains("50%"));
        assert!(text.contains("Q1 ✓"));
        assert!(text.contains("Q2 ✗"));
    }
}
