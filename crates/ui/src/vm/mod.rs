mod achievement_vm;
mod admin_vm;
mod cuisine_vm;
mod lesson_vm;
mod quiz_vm;

pub use achievement_vm::{AchievementVm, map_achievements};
pub use admin_vm::{UserRowVm, map_user_rows};
pub use cuisine_vm::{CuisineCardVm, SkillCardVm, map_cuisine_card, map_skill_card};
pub use lesson_vm::{
    LessonPageVm, LessonRowVm, LessonSectionVm, map_lesson_page, map_lesson_row,
};
pub use quiz_vm::{QuizQuestionVm, map_quiz_question, quiz_result_message};
