//! Maze minigame
//!
//! An alternate presentation of a lesson's quiz: each correct answer moves
//! the player one cell toward the exit of a fixed 5x4 maze, each wrong
//! answer one cell back, clamped at the entrance. The game ends when the
//! player reaches the exit cell or runs out of questions, and only the
//! first counts as a win. Nothing is persisted here; the app routes on the
//! outcome.

use rand::Rng;
use rand::seq::SliceRandom;

use super::QuestionSession;
use crate::lesson::QuizQuestion;

/// Maze width in cells
pub const COLS: usize = 5;
/// Maze height in cells
pub const ROWS: usize = 4;

/// Pause before showing results once the game has ended, in milliseconds
pub const END_DELAY_MS: u64 = 300;
/// Pause on the feedback before the next question, in milliseconds
pub const NEXT_DELAY_MS: u64 = 1500;

/// Feedback for the most recent answer, kept until the pacing delay expires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeFeedback {
    /// Index into the shuffled question list of the answered question
    pub question_index: usize,
    /// Option the player picked
    pub selected: usize,
    /// Whether it was the correct option
    pub correct: bool,
}

impl MazeFeedback {
    /// Feedback line shown under the prompt
    pub fn message(&self) -> &'static str {
        if self.correct {
            "Correct! The door opens."
        } else {
            "Wrong way! You take a step back."
        }
    }
}

/// The maze game state machine
#[derive(Debug, Clone)]
pub struct MazeGame {
    /// Question list, shuffled once at start
    questions: Vec<QuizQuestion>,
    /// Cursor into the shuffled list
    question_index: usize,
    /// Player column, in `[0, COLS)`
    x: usize,
    /// Player row, in `[0, ROWS)`
    y: usize,
    /// Feedback awaiting its pacing delay
    feedback: Option<MazeFeedback>,
    /// Set when the game ends; true means the exit was reached
    outcome: Option<bool>,
}

impl MazeGame {
    /// Start a game over the given questions, shuffling them uniformly
    pub fn new<R: Rng + ?Sized>(mut questions: Vec<QuizQuestion>, rng: &mut R) -> Self {
        questions.shuffle(rng);
        let outcome = if questions.is_empty() { Some(false) } else { None };
        Self { questions, question_index: 0, x: 0, y: 0, feedback: None, outcome }
    }

    /// Player position as (column, row)
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Player position as a linear cell index
    pub fn cell_index(&self) -> usize {
        self.y * COLS + self.x
    }

    /// Linear index of the exit cell
    pub fn exit_cell() -> usize {
        COLS * ROWS - 1
    }

    /// Game outcome: `Some(true)` exit reached, `Some(false)` questions ran
    /// out first, `None` still playing
    pub fn won(&self) -> Option<bool> {
        self.outcome
    }

    /// Questions answered so far
    pub fn questions_answered(&self) -> usize {
        self.question_index
    }

    /// Total questions available this game
    pub fn questions_total(&self) -> usize {
        self.questions.len()
    }

    /// Pending feedback, if the pacing delay has not expired yet
    pub fn feedback(&self) -> Option<&MazeFeedback> {
        self.feedback.as_ref()
    }

    /// Question the pending feedback refers to
    pub fn feedback_question(&self) -> Option<&QuizQuestion> {
        self.feedback.as_ref().and_then(|f| self.questions.get(f.question_index))
    }

    /// Clear pending feedback, re-enabling answers
    pub fn clear_feedback(&mut self) {
        self.feedback = None;
    }

    /// One step forward, wrapping to the next row at the right edge
    fn advance_cell(&mut self) {
        self.x += 1;
        if self.x >= COLS {
            self.x = 0;
            self.y += 1;
        }
    }

    /// One step back, wrapping to the previous row, absorbed at the origin
    fn retreat_cell(&mut self) {
        if self.x > 0 {
            self.x -= 1;
        } else if self.y > 0 {
            self.x = COLS - 1;
            self.y -= 1;
        }
    }
}

impl QuestionSession for MazeGame {
    fn current_question(&self) -> Option<&QuizQuestion> {
        if self.outcome.is_some() {
            return None;
        }
        self.questions.get(self.question_index)
    }

    fn answer(&mut self, selected: usize) -> Option<bool> {
        if self.outcome.is_some() || self.feedback.is_some() {
            return None;
        }
        let question = self.questions.get(self.question_index)?;
        if selected >= question.options.len() {
            return None;
        }

        let correct = question.is_correct(selected);
        if correct {
            self.advance_cell();
        } else {
            self.retreat_cell();
        }

        self.feedback = Some(MazeFeedback { question_index: self.question_index, selected, correct });
        self.question_index += 1;

        let reached_exit = self.cell_index() >= Self::exit_cell();
        if reached_exit || self.question_index >= self.questions.len() {
            self.outcome = Some(reached_exit);
        }

        Some(correct)
    }

    fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn question(correct: usize) -> QuizQuestion {
        QuizQuestion {
            question: "Which way?".to_string(),
            bengali_focus: None,
            phonetic_focus: None,
            options: vec!["অ".into(), "আ".into(), "ই".into()],
            correct_answer: correct,
            explanation: None,
        }
    }

    /// A game with `n` questions whose correct answer is always option 0,
    /// with a shuffle that cannot change observable behavior.
    fn game(n: usize) -> MazeGame {
        let mut rng = StdRng::seed_from_u64(7);
        MazeGame::new((0..n).map(|_| question(0)).collect(), &mut rng)
    }

    /// Answer once (correctly or not) and clear the pacing feedback.
    fn step(game: &mut MazeGame, correct: bool) {
        let pick = if correct { 0 } else { 1 };
        game.answer(pick);
        game.clear_feedback();
    }

    #[test]
    fn correct_answer_advances_one_cell() {
        let mut game = game(30);
        step(&mut game, true);
        assert_eq!(game.position(), (1, 0));
    }

    #[test]
    fn advance_wraps_to_next_row() {
        let mut game = game(30);
        for _ in 0..4 {
            step(&mut game, true);
        }
        assert_eq!(game.position(), (4, 0));
        step(&mut game, true);
        assert_eq!(game.position(), (0, 1));
    }

    #[test]
    fn wrong_answer_at_origin_is_absorbed() {
        let mut game = game(30);
        step(&mut game, false);
        assert_eq!(game.position(), (0, 0));
        assert!(game.won().is_none());
    }

    #[test]
    fn retreat_wraps_to_previous_row() {
        let mut game = game(30);
        for _ in 0..5 {
            step(&mut game, true);
        }
        assert_eq!(game.position(), (0, 1));
        step(&mut game, false);
        assert_eq!(game.position(), (4, 0));
    }

    #[test]
    fn reaching_exit_cell_wins() {
        let mut game = game(30);
        for _ in 0..19 {
            step(&mut game, true);
        }
        assert_eq!(game.cell_index(), 19);
        assert_eq!(game.won(), Some(true));
        assert!(game.is_complete());
        assert!(game.current_question().is_none());
    }

    #[test]
    fn exhausting_questions_short_of_exit_loses() {
        let mut game = game(5);
        for _ in 0..5 {
            step(&mut game, true);
        }
        assert_eq!(game.cell_index(), 5);
        assert_eq!(game.won(), Some(false));
    }

    #[test]
    fn win_on_final_question_still_counts() {
        let mut game = game(19);
        for _ in 0..19 {
            step(&mut game, true);
        }
        assert_eq!(game.won(), Some(true));
    }

    #[test]
    fn answers_rejected_while_feedback_pending() {
        let mut game = game(30);
        assert_eq!(game.answer(0), Some(true));
        assert_eq!(game.answer(0), None);
        assert_eq!(game.position(), (1, 0));

        game.clear_feedback();
        assert_eq!(game.answer(0), Some(true));
    }

    #[test]
    fn answers_rejected_after_game_over() {
        let mut game = game(1);
        step(&mut game, true);
        assert!(game.is_complete());
        assert_eq!(game.answer(0), None);
    }

    #[test]
    fn feedback_refers_to_answered_question() {
        let mut game = game(3);
        game.answer(1);
        let feedback = game.feedback().copied().unwrap();
        assert_eq!(feedback.question_index, 0);
        assert_eq!(feedback.selected, 1);
        assert!(!feedback.correct);
        assert!(game.feedback_question().is_some());
    }

    #[test]
    fn empty_question_set_is_an_immediate_loss() {
        let mut rng = StdRng::seed_from_u64(7);
        let game = MazeGame::new(Vec::new(), &mut rng);
        assert_eq!(game.won(), Some(false));
    }

    #[test]
    fn shuffle_preserves_question_multiset() {
        let questions: Vec<QuizQuestion> = (0..8).map(question).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let game = MazeGame::new(questions, &mut rng);

        let mut answers: Vec<usize> =
            game.questions.iter().map(|q| q.correct_answer).collect();
        answers.sort_unstable();
        assert_eq!(answers, (0..8).collect::<Vec<_>>());
    }

    proptest! {
        #[test]
        fn position_stays_inside_grid(answers in proptest::collection::vec(any::<bool>(), 0..40)) {
            let mut game = game(40);
            let mut net: i64 = 0;
            let mut correct_count: usize = 0;

            for correct in answers {
                if game.is_complete() {
                    break;
                }
                step(&mut game, correct);
                net += if correct { 1 } else { -1 };
                correct_count += usize::from(correct);

                let (x, y) = game.position();
                prop_assert!(x < COLS);
                prop_assert!(y < ROWS);
                prop_assert!(game.cell_index() <= MazeGame::exit_cell());
                // Clamping at the origin only ever absorbs backward steps,
                // so the cell never falls below the net and never exceeds
                // the number of forward steps.
                prop_assert!((game.cell_index() as i64) >= net);
                prop_assert!(game.cell_index() <= correct_count);
            }
        }
    }
}
