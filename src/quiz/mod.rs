//! Quiz attempt state machine
//!
//! An attempt walks a lesson's question list one question at a time:
//! answering enters a feedback phase (options locked, correctness shown),
//! and continuing either advances to the next question or finishes the
//! attempt. The maze game in [`maze`] presents the same questions through
//! the shared [`QuestionSession`] interface.

pub mod maze;

use crate::lesson::QuizQuestion;
use crate::progress::percent_complete;

/// Common interface over the linear quiz and the maze game
///
/// Both flows present one multiple-choice question at a time and accept a
/// positional answer; the presentation (progress bar vs. maze movement)
/// is layered on top by the caller.
pub trait QuestionSession {
    /// The question currently awaiting an answer, if any
    fn current_question(&self) -> Option<&QuizQuestion>;

    /// Answer the current question by option index
    ///
    /// Returns whether the answer was correct, or `None` if no answer is
    /// accepted right now (no active question, index out of range, or
    /// feedback still showing).
    fn answer(&mut self, selected: usize) -> Option<bool>;

    /// Whether the session has ended
    fn is_complete(&self) -> bool;
}

/// One recorded answer within an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord {
    /// Index of the question in the attempt's sequence
    pub question_index: usize,
    /// Option index the learner selected
    pub selected: usize,
    /// Whether the selection was correct
    pub correct: bool,
}

/// Where the attempt currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Waiting for an answer to the current question
    Question,
    /// Showing correctness feedback for the last answer
    Feedback,
    /// All questions answered
    Finished,
}

/// Result of a continue action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    /// Moved on to the next question
    Next,
    /// The attempt is over
    Finished,
}

/// One run-through of a lesson's quiz
#[derive(Debug, Clone)]
pub struct QuizAttempt {
    questions: Vec<QuizQuestion>,
    current: usize,
    score: usize,
    answers: Vec<AnswerRecord>,
    phase: Phase,
}

impl QuizAttempt {
    /// Start a fresh attempt over the given questions
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let phase = if questions.is_empty() { Phase::Finished } else { Phase::Question };
        Self { questions, current: 0, score: 0, answers: Vec::new(), phase }
    }

    /// Zero-based index of the current question
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Total number of questions in the attempt
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Correct answers so far
    pub fn score(&self) -> usize {
        self.score
    }

    /// Ordered log of answers given so far
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Whether feedback for the last answer is showing
    pub fn in_feedback(&self) -> bool {
        self.phase == Phase::Feedback
    }

    /// The most recent answer, if any
    pub fn last_answer(&self) -> Option<&AnswerRecord> {
        self.answers.last()
    }

    /// Whether the current question is the last one
    pub fn on_last_question(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    /// Move past the feedback phase
    pub fn advance(&mut self) -> QuizStep {
        match self.phase {
            Phase::Feedback => {
                if self.current + 1 < self.questions.len() {
                    self.current += 1;
                    self.phase = Phase::Question;
                    QuizStep::Next
                } else {
                    self.phase = Phase::Finished;
                    QuizStep::Finished
                }
            }
            Phase::Finished => QuizStep::Finished,
            // Nothing to advance past; stay on the open question.
            Phase::Question => QuizStep::Next,
        }
    }

    /// Whether the attempt meets the pass threshold
    pub fn passed(&self) -> bool {
        self.score >= pass_threshold(self.questions.len())
    }

    /// Final numbers for the results screen
    pub fn summary(&self) -> QuizSummary {
        let total = self.questions.len();
        let percent = percent_complete(self.score, total);
        QuizSummary {
            score: self.score,
            total,
            percent,
            passed: self.passed(),
            tier: ScoreTier::from_percent(percent),
        }
    }
}

impl QuestionSession for QuizAttempt {
    fn current_question(&self) -> Option<&QuizQuestion> {
        match self.phase {
            Phase::Question | Phase::Feedback => self.questions.get(self.current),
            Phase::Finished => None,
        }
    }

    fn answer(&mut self, selected: usize) -> Option<bool> {
        if self.phase != Phase::Question {
            return None;
        }
        let question = self.questions.get(self.current)?;
        if selected >= question.options.len() {
            return None;
        }

        let correct = question.is_correct(selected);
        self.answers.push(AnswerRecord { question_index: self.current, selected, correct });
        if correct {
            self.score += 1;
        }
        self.phase = Phase::Feedback;
        Some(correct)
    }

    fn is_complete(&self) -> bool {
        self.phase == Phase::Finished
    }
}

/// Minimum score needed to pass a quiz of `total` questions
///
/// Seventy percent, rounded up.
pub fn pass_threshold(total: usize) -> usize {
    (total * 7).div_ceil(10)
}

/// Final outcome of a quiz attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSummary {
    /// Correct answers
    pub score: usize,
    /// Question count
    pub total: usize,
    /// Score as a rounded percentage
    pub percent: u8,
    /// Whether the pass threshold was met
    pub passed: bool,
    /// Message tier for the result screen
    pub tier: ScoreTier,
}

/// Result message tier, by score percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    /// 90% and up
    Excellent,
    /// 70–89%
    Great,
    /// 50–69%
    Good,
    /// Below 50%
    NeedsPractice,
}

impl ScoreTier {
    /// Pick the tier for a percentage score
    pub fn from_percent(percent: u8) -> Self {
        if percent >= 90 {
            ScoreTier::Excellent
        } else if percent >= 70 {
            ScoreTier::Great
        } else if percent >= 50 {
            ScoreTier::Good
        } else {
            ScoreTier::NeedsPractice
        }
    }

    /// Result screen message for this tier
    pub fn message(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => "Excellent! You have mastered this lesson!",
            ScoreTier::Great => "Great job! You're doing well!",
            ScoreTier::Good => "Good effort! Keep practicing to improve!",
            ScoreTier::NeedsPractice => "Keep trying! Review the lesson and try again!",
        }
    }
}
