use chefs_core::model::Quiz;

/// One quiz question as shown on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizQuestionVm {
    pub index_label: String,
    pub question: String,
    pub options: Vec<String>,
}

#[must_use]
pub fn map_quiz_question(question: &Quiz, index: usize, total: usize) -> QuizQuestionVm {
    QuizQuestionVm {
        index_label: format!("Question {} of {}", index + 1, total),
        question: question.question_text.clone(),
        options: question
            .options()
            .iter()
            .map(|option| (*option).to_string())
            .collect(),
    }
}

#[must_use]
pub fn quiz_result_message(score: usize, total: usize) -> String {
    if total > 0 && score == total {
        "Perfect! Lesson completed.".to_string()
    } else {
        "You need every answer correct to complete the lesson. Give it another go!".to_string()
    }
}
