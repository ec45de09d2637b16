use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::{Lesson, LessonContent};
use super::ids::{LessonId, QuizId};

/// Index of the correct option in an assembled options list.
///
/// The backend stores one designated correct answer plus three wrong ones,
/// and [`Quiz::options`] always places the correct answer first. Views must
/// shuffle for display if they need to; correctness checks compare against
/// this named index, never a literal.
pub const CORRECT_ANSWER_INDEX: usize = 0;

/// Number of options every quiz question carries.
pub const OPTION_COUNT: usize = 4;

/// A single multiple-choice question attached to a lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: QuizId,
    pub lesson_id: LessonId,
    pub question_text: String,
    pub correct_answer: String,
    #[serde(default)]
    pub wrong_answer1: String,
    #[serde(default)]
    pub wrong_answer2: String,
    #[serde(default)]
    pub wrong_answer3: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub order_index: i32,
}

impl Quiz {
    /// Assembles the options list with the correct answer at
    /// [`CORRECT_ANSWER_INDEX`].
    #[must_use]
    pub fn options(&self) -> [&str; OPTION_COUNT] {
        [
            self.correct_answer.as_str(),
            self.wrong_answer1.as_str(),
            self.wrong_answer2.as_str(),
            self.wrong_answer3.as_str(),
        ]
    }

    /// Validates the question shape at ingestion time.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` when the question text or the designated correct
    /// answer is empty.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.question_text.trim().is_empty() {
            return Err(QuizError::EmptyQuestion { id: self.id });
        }
        if self.correct_answer.trim().is_empty() {
            return Err(QuizError::MissingCorrectAnswer { id: self.id });
        }
        Ok(())
    }
}

/// Validation failures for ingested quiz data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz {id} has an empty question")]
    EmptyQuestion { id: QuizId },
    #[error("quiz {id} has no correct answer")]
    MissingCorrectAnswer { id: QuizId },
}

/// A lesson with its content sections and quiz questions, as returned by
/// `GET /lessons/:id/full`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonBundle {
    pub lesson: Lesson,
    #[serde(default)]
    pub content: Vec<LessonContent>,
    #[serde(default)]
    pub quizzes: Vec<Quiz>,
}

impl LessonBundle {
    /// Validates every quiz question and sorts content and quizzes by their
    /// order index. Called once at ingestion so downstream state machines can
    /// rely on the shape.
    ///
    /// # Errors
    ///
    /// Returns the first `QuizError` found.
    pub fn into_validated(mut self) -> Result<Self, QuizError> {
        for quiz in &self.quizzes {
            quiz.validate()?;
        }
        self.content.sort_by_key(|section| section.order_index);
        self.quizzes.sort_by_key(|quiz| quiz.order_index);
        Ok(self)
    }
}
