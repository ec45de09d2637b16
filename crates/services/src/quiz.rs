use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

use chefs_core::model::{
    CORRECT_ANSWER_INDEX, LessonBundle, LessonId, OPTION_COUNT, Quiz, UserId,
};

use crate::progress_tracker::{FULL_SCORE, ProgressTracker};

/// Where the attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Waiting for an answer to the current question.
    Answering,
    /// Current question answered; waiting for "next".
    Answered,
    /// All questions answered; terminal.
    Results,
}

/// Aggregated view of attempt progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

/// Outcome of answering one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub selected: usize,
    pub correct: bool,
}

/// Invalid transitions and construction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QuizStepError {
    #[error("lesson has no quiz questions")]
    NoQuestions,
    #[error("option index {0} is out of range")]
    OutOfRange(usize),
    #[error("current question has not been answered yet")]
    NotAnswered,
    #[error("quiz attempt is already finished")]
    Finished,
}

/// Ephemeral, page-scoped quiz attempt.
///
/// Steps `Answering → Answered` per question, then to terminal `Results`.
/// Never persisted: leaving the quiz page drops the attempt, and re-entering
/// constructs a fresh one at question zero with score zero.
#[derive(Debug, Clone)]
pub struct QuizSession {
    lesson_id: LessonId,
    quizzes: Vec<Quiz>,
    current: usize,
    selected: Option<usize>,
    correct: Option<bool>,
    score: usize,
    answers: HashMap<usize, usize>,
    results: bool,
}

impl QuizSession {
    /// Builds an attempt from a validated bundle.
    ///
    /// # Errors
    ///
    /// Returns `QuizStepError::NoQuestions` for a lesson without quizzes.
    pub fn new(bundle: &LessonBundle) -> Result<Self, QuizStepError> {
        if bundle.quizzes.is_empty() {
            return Err(QuizStepError::NoQuestions);
        }
        Ok(Self {
            lesson_id: bundle.lesson.id,
            quizzes: bundle.quizzes.clone(),
            current: 0,
            selected: None,
            correct: None,
            score: 0,
            answers: HashMap::new(),
            results: false,
        })
    }

    #[must_use]
    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        if self.results {
            QuizPhase::Results
        } else if self.selected.is_some() {
            QuizPhase::Answered
        } else {
            QuizPhase::Answering
        }
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question currently on screen; `None` once at `Results`.
    #[must_use]
    pub fn current_question(&self) -> Option<&Quiz> {
        if self.results {
            None
        } else {
            self.quizzes.get(self.current)
        }
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn last_answer_correct(&self) -> Option<bool> {
        self.correct
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.quizzes.len()
    }

    /// All answers recorded so far, keyed by question index.
    #[must_use]
    pub fn answers(&self) -> &HashMap<usize, usize> {
        &self.answers
    }

    /// True when every question was answered correctly.
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.score == self.quizzes.len()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let total = self.quizzes.len();
        let answered = self.answers.len();
        QuizProgress {
            total,
            answered,
            remaining: total - answered,
            is_complete: self.results,
        }
    }

    /// Records an answer for the current question.
    ///
    /// Correctness compares against [`CORRECT_ANSWER_INDEX`]. Selecting
    /// again on an already-answered question is an idempotent no-op that
    /// returns the recorded outcome.
    ///
    /// # Errors
    ///
    /// Returns `Finished` at `Results` and `OutOfRange` for a bad index.
    pub fn select(&mut self, answer_index: usize) -> Result<AnswerOutcome, QuizStepError> {
        if self.results {
            return Err(QuizStepError::Finished);
        }
        if let (Some(selected), Some(correct)) = (self.selected, self.correct) {
            return Ok(AnswerOutcome { selected, correct });
        }
        if answer_index >= OPTION_COUNT {
            return Err(QuizStepError::OutOfRange(answer_index));
        }

        let correct = answer_index == CORRECT_ANSWER_INDEX;
        self.selected = Some(answer_index);
        self.correct = Some(correct);
        self.answers.insert(self.current, answer_index);
        if correct {
            self.score += 1;
        }
        Ok(AnswerOutcome {
            selected: answer_index,
            correct,
        })
    }

    /// Moves to the next question, or to `Results` after the last one.
    ///
    /// # Errors
    ///
    /// Returns `NotAnswered` while the current question is pending and
    /// `Finished` once at `Results`.
    pub fn advance(&mut self) -> Result<QuizPhase, QuizStepError> {
        if self.results {
            return Err(QuizStepError::Finished);
        }
        if self.selected.is_none() {
            return Err(QuizStepError::NotAnswered);
        }

        if self.current + 1 < self.quizzes.len() {
            self.current += 1;
            self.selected = None;
            self.correct = None;
            Ok(QuizPhase::Answering)
        } else {
            self.results = true;
            self.selected = None;
            self.correct = None;
            Ok(QuizPhase::Results)
        }
    }
}

/// Result of finishing an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: usize,
    pub total: usize,
    /// All questions answered correctly.
    pub passed: bool,
    /// The completion reached the backend. Always false for a failed run;
    /// partial credit is never persisted.
    pub saved: bool,
}

/// Applies the all-correct completion policy at `Results`: a perfect run is
/// persisted through the tracker, anything else is discarded.
///
/// A perfect run whose save fails still reports `passed: true` so the view
/// can tell the user and navigate away.
pub async fn finish_quiz(
    session: &QuizSession,
    tracker: &ProgressTracker,
    user_id: UserId,
) -> QuizOutcome {
    let total = session.total();
    let score = session.score();

    if session.phase() != QuizPhase::Results {
        warn!("finish_quiz called before the attempt reached results");
        return QuizOutcome {
            score,
            total,
            passed: false,
            saved: false,
        };
    }

    let passed = session.is_perfect();
    let saved = if passed {
        tracker
            .save_completion(user_id, session.lesson_id(), FULL_SCORE)
            .await
    } else {
        false
    };

    QuizOutcome {
        score,
        total,
        passed,
        saved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chefs_core::model::{Lesson, QuizId, SkillId};

    fn question(id: i64) -> Quiz {
        Quiz {
            id: QuizId::new(id),
            lesson_id: LessonId::new(1),
            question_text: format!("Q{id}"),
            correct_answer: "right".into(),
            wrong_answer1: "w1".into(),
            wrong_answer2: "w2".into(),
            wrong_answer3: "w3".into(),
            explanation: None,
            order_index: 0,
        }
    }

    fn bundle(count: i64) -> LessonBundle {
        LessonBundle {
            lesson: Lesson {
                id: LessonId::new(1),
                skill_id: SkillId::new(1),
                name: "Knife Basics".into(),
                description: None,
                order_index: 0,
                xp_reward: 10,
                icon: None,
            },
            content: Vec::new(),
            quizzes: (1..=count).map(question).collect(),
        }
    }

    #[test]
    fn lesson_without_questions_is_rejected() {
        assert_eq!(
            QuizSession::new(&bundle(0)).unwrap_err(),
            QuizStepError::NoQuestions
        );
    }

    #[test]
    fn correct_answer_increments_score() {
        let mut session = QuizSession::new(&bundle(2)).unwrap();
        let outcome = session.select(CORRECT_ANSWER_INDEX).unwrap();
        assert!(outcome.correct);
        assert_eq!(session.score(), 1);
        assert_eq!(session.phase(), QuizPhase::Answered);
    }

    #[test]
    fn wrong_answer_does_not_change_score() {
        let mut session = QuizSession::new(&bundle(2)).unwrap();
        let outcome = session.select(2).unwrap();
        assert!(!outcome.correct);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn repeat_selection_is_an_idempotent_no_op() {
        let mut session = QuizSession::new(&bundle(1)).unwrap();
        session.select(CORRECT_ANSWER_INDEX).unwrap();

        // A second click cannot change the recorded answer or the score.
        let outcome = session.select(3).unwrap();
        assert_eq!(outcome.selected, CORRECT_ANSWER_INDEX);
        assert!(outcome.correct);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let mut session = QuizSession::new(&bundle(1)).unwrap();
        assert_eq!(
            session.select(OPTION_COUNT).unwrap_err(),
            QuizStepError::OutOfRange(OPTION_COUNT)
        );
        assert_eq!(session.phase(), QuizPhase::Answering);
    }

    #[test]
    fn advance_requires_an_answer() {
        let mut session = QuizSession::new(&bundle(2)).unwrap();
        assert_eq!(session.advance().unwrap_err(), QuizStepError::NotAnswered);
    }

    #[test]
    fn full_run_walks_to_results() {
        let mut session = QuizSession::new(&bundle(3)).unwrap();
        for expected in [QuizPhase::Answering, QuizPhase::Answering, QuizPhase::Results] {
            session.select(CORRECT_ANSWER_INDEX).unwrap();
            assert_eq!(session.advance().unwrap(), expected);
        }

        assert!(session.is_perfect());
        assert_eq!(session.score(), 3);
        assert!(session.current_question().is_none());
        assert_eq!(session.advance().unwrap_err(), QuizStepError::Finished);
        assert_eq!(session.select(0).unwrap_err(), QuizStepError::Finished);
    }

    #[test]
    fn score_stays_within_bounds() {
        let mut session = QuizSession::new(&bundle(3)).unwrap();
        session.select(CORRECT_ANSWER_INDEX).unwrap();
        session.advance().unwrap();
        session.select(1).unwrap();
        session.advance().unwrap();
        session.select(CORRECT_ANSWER_INDEX).unwrap();
        session.advance().unwrap();

        assert_eq!(session.score(), 2);
        assert!(session.score() <= session.total());
        assert!(!session.is_perfect());
    }

    mod workflow {
        use super::*;
        use api::{ChefsApi, InMemoryApi};
        use chefs_core::time::fixed_clock;
        use std::sync::Arc;

        fn tracker(api: &InMemoryApi) -> ProgressTracker {
            ProgressTracker::new(Arc::new(api.clone()), fixed_clock())
        }

        async fn run(session: &mut QuizSession, answers: &[usize]) {
            for &answer in answers {
                session.select(answer).unwrap();
                session.advance().unwrap();
            }
        }

        #[tokio::test]
        async fn perfect_run_persists_completion() {
            let api = InMemoryApi::new();
            let tracker = tracker(&api);
            let mut session = QuizSession::new(&bundle(2)).unwrap();
            run(&mut session, &[0, 0]).await;

            let outcome = finish_quiz(&session, &tracker, UserId::new(5)).await;
            assert!(outcome.passed);
            assert!(outcome.saved);
            assert!(tracker.is_completed(LessonId::new(1)));
            let record = tracker.record_for(LessonId::new(1)).unwrap();
            assert_eq!(record.score, Some(FULL_SCORE));
        }

        #[tokio::test]
        async fn imperfect_run_is_discarded() {
            let api = InMemoryApi::new();
            let tracker = tracker(&api);
            let mut session = QuizSession::new(&bundle(2)).unwrap();
            run(&mut session, &[0, 1]).await;

            let outcome = finish_quiz(&session, &tracker, UserId::new(5)).await;
            assert!(!outcome.passed);
            assert!(!outcome.saved);
            assert!(!tracker.is_completed(LessonId::new(1)));
            assert!(api.list_progress(UserId::new(5)).await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn save_failure_on_perfect_run_reports_unsaved() {
            let api = InMemoryApi::new();
            api.set_fail_submit(true);
            let tracker = tracker(&api);
            let mut session = QuizSession::new(&bundle(1)).unwrap();
            run(&mut session, &[0]).await;

            let outcome = finish_quiz(&session, &tracker, UserId::new(5)).await;
            assert!(outcome.passed);
            assert!(!outcome.saved);
        }
    }
}
