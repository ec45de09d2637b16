use chefs_core::model::{
    Lesson, LessonBundle, LessonId, ProgressRecord, ProgressStatus,
};

/// One lesson row on a skill page.
#[derive(Clone, Debug, PartialEq)]
pub struct LessonRowVm {
    pub id: LessonId,
    pub name: String,
    pub xp_label: String,
    pub status_label: String,
    pub completed: bool,
}

/// `completed` already folds in optimistic completions that have not been
/// confirmed by a fetch yet, so a just-finished quiz shows immediately.
#[must_use]
pub fn map_lesson_row(
    lesson: &Lesson,
    record: Option<&ProgressRecord>,
    completed: bool,
) -> LessonRowVm {
    let status_label = if completed {
        "Completed".to_string()
    } else {
        match record.map(|record| record.status) {
            Some(ProgressStatus::Locked) => "Locked".to_string(),
            _ => "Available".to_string(),
        }
    };
    LessonRowVm {
        id: lesson.id,
        name: lesson.name.clone(),
        xp_label: format!("{} XP", lesson.xp_reward),
        status_label,
        completed,
    }
}

/// One content section of a lesson page.
#[derive(Clone, Debug, PartialEq)]
pub struct LessonSectionVm {
    pub title: Option<String>,
    pub body: String,
    pub picture_url: Option<String>,
}

/// The full lesson page: header, ordered sections, quiz call-to-action.
#[derive(Clone, Debug, PartialEq)]
pub struct LessonPageVm {
    pub name: String,
    pub description: String,
    pub completed: bool,
    pub sections: Vec<LessonSectionVm>,
    pub quiz_count: usize,
    pub quiz_cta: String,
}

#[must_use]
pub fn map_lesson_page(bundle: &LessonBundle, completed: bool) -> LessonPageVm {
    let sections = bundle
        .content
        .iter()
        .map(|section| LessonSectionVm {
            title: section.section_title.clone(),
            body: section.content_text.clone(),
            picture_url: section.picture_url.clone(),
        })
        .collect();
    let quiz_count = bundle.quizzes.len();
    let quiz_cta = if completed {
        "Retake the quiz".to_string()
    } else if quiz_count == 1 {
        "Take the quiz (1 question)".to_string()
    } else {
        format!("Take the quiz ({quiz_count} questions)")
    };
    LessonPageVm {
        name: bundle.lesson.name.clone(),
        description: bundle.lesson.description.clone().unwrap_or_default(),
        completed,
        sections,
        quiz_count,
        quiz_cta,
    }
}

#[cfg(test)]
mod tests {
    use chefs_core::model::{LessonContent, Quiz, QuizId, SkillId, UserId};

    use super::*;

    fn lesson(id: i64) -> Lesson {
        Lesson {
            id: LessonId::new(id),
            skill_id: SkillId::new(1),
            name: "Knife Skills".into(),
            description: Some("The basics".into()),
            order_index: 0,
            xp_reward: 25,
            icon: None,
        }
    }

    fn question(id: i64) -> Quiz {
        Quiz {
            id: QuizId::new(id),
            lesson_id: LessonId::new(1),
            question_text: "Which grip?".into(),
            correct_answer: "pinch".into(),
            wrong_answer1: "hammer".into(),
            wrong_answer2: "claw".into(),
            wrong_answer3: "palm".into(),
            explanation: None,
            order_index: 0,
        }
    }

    #[test]
    fn completed_row_wins_over_record_status() {
        let record = ProgressRecord {
            user_id: UserId::new(1),
            lesson_id: LessonId::new(1),
            status: ProgressStatus::Locked,
            score: None,
            completed_at: None,
        };
        let row = map_lesson_row(&lesson(1), Some(&record), true);
        assert_eq!(row.status_label, "Completed");
        assert!(row.completed);
    }

    #[test]
    fn locked_record_shows_locked() {
        let record = ProgressRecord {
            user_id: UserId::new(1),
            lesson_id: LessonId::new(1),
            status: ProgressStatus::Locked,
            score: None,
            completed_at: None,
        };
        let row = map_lesson_row(&lesson(1), Some(&record), false);
        assert_eq!(row.status_label, "Locked");
    }

    #[test]
    fn no_record_defaults_to_available() {
        let row = map_lesson_row(&lesson(1), None, false);
        assert_eq!(row.status_label, "Available");
        assert_eq!(row.xp_label, "25 XP");
    }

    #[test]
    fn page_cta_counts_questions() {
        let bundle = LessonBundle {
            lesson: lesson(1),
            content: vec![LessonContent {
                id: 1,
                lesson_id: LessonId::new(1),
                section_title: Some("Grip".into()),
                content_text: "Hold the blade.".into(),
                order_index: 0,
                picture_url: None,
            }],
            quizzes: vec![question(1), question(2)],
        };
        let page = map_lesson_page(&bundle, false);
        assert_eq!(page.sections.len(), 1);
        assert_eq!(page.quiz_cta, "Take the quiz (2 questions)");

        let retake = map_lesson_page(&bundle, true);
        assert_eq!(retake.quiz_cta, "Retake the quiz");
    }
}
