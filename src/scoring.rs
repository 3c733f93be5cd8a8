// src/scoring.rs

use crate::models::question::{Question, QuestionType};

/// Automatic score for a submitted answer.
///
/// Multiple-choice answers get the question's full score on an exact,
/// case-sensitive match with the stored answer and `0` otherwise.
/// Essay answers are left ungraded (`None`) for a teacher to score.
pub fn score_answer(question: &Question, submitted: &str) -> Option<i32> {
    match question.question_type {
        QuestionType::MultipleChoice => {
            if question.answer.as_deref() == Some(submitted) {
                Some(question.score)
            } else {
                Some(0)
            }
        }
        QuestionType::Essay => None,
    }
}
