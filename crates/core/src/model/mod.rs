mod achievement;
mod catalog;
mod ids;
mod progress;
mod quiz;
mod user;

pub use achievement::{Achievement, AchievementStatus, merge_unlocks};
pub use catalog::{Cuisine, Lesson, LessonContent, Skill};
pub use ids::{AchievementId, CuisineId, LessonId, QuizId, SkillId, UserId};
pub use progress::{
    ProgressRecord, ProgressStatus, ProgressSummary, completed_lesson_set,
};
pub use quiz::{CORRECT_ANSWER_INDEX, LessonBundle, OPTION_COUNT, Quiz, QuizError};
pub use user::{User, UserPatch};
