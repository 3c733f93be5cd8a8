// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use url::Url;
use validator::Validate;

use crate::{error::AppError, models::user::Role, utils::html::clean_html};

/// Question kind. Stored as the `question_type` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "question_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    Essay,
}

/// Raw row of the 'questions' table.
/// `options` is a JSON-encoded array kept in a TEXT column.
#[derive(Debug, FromRow)]
pub struct QuestionRow {
    pub id: i64,
    #[sqlx(rename = "type")]
    pub question_type: QuestionType,
    pub question: String,
    pub options: Option<String>,
    pub answer: Option<String>,
    pub image_url: Option<String>,
    pub score: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// A question with its options decoded.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: i64,

    /// Mapped from the column 'type' since `type` is a reserved keyword in Rust.
    #[serde(rename = "type")]
    pub question_type: QuestionType,

    /// Question text (sanitized HTML).
    pub question: String,

    /// Ordered choices; empty for essay questions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    /// Correct answer. Only ever serialized for admins, see [`Question::for_role`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Full-credit value.
    pub score: i32,

    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<QuestionRow> for Question {
    type Error = AppError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        let options = match row.options.as_deref() {
            None | Some("") => Vec::new(),
            Some(raw) => serde_json::from_str(raw).map_err(|e| {
                AppError::InternalServerError(format!(
                    "question {} has malformed options column: {}",
                    row.id, e
                ))
            })?,
        };

        Ok(Question {
            id: row.id,
            question_type: row.question_type,
            question: row.question,
            options,
            answer: row.answer,
            image_url: row.image_url,
            score: row.score,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl Question {
    /// Strips the correct answer unless the caller is an admin.
    pub fn for_role(mut self, role: Role) -> Self {
        if role != Role::Admin {
            self.answer = None;
        }
        self
    }
}

/// DTO for creating or replacing a question.
#[derive(Debug, Deserialize, Validate)]
pub struct QuestionRequest {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[validate(length(min = 1, max = 5000))]
    pub question: String,
    #[serde(default)]
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    #[validate(length(min = 1, max = 500))]
    pub answer: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub image_url: Option<String>,
    #[validate(range(min = 0, max = 1000))]
    pub score: i32,
}

/// Validated, sanitized fields ready to be written.
#[derive(Debug)]
pub struct NewQuestion {
    pub question_type: QuestionType,
    pub question: String,
    /// JSON-encoded options, `None` for essay questions.
    pub options: Option<String>,
    pub answer: Option<String>,
    pub image_url: Option<String>,
    pub score: i32,
}

impl QuestionRequest {
    /// Runs field validation plus the cross-field rules that depend on the question type,
    /// then sanitizes the text and encodes the options column.
    pub fn into_new_question(self) -> Result<NewQuestion, AppError> {
        self.validate()?;

        match self.question_type {
            QuestionType::MultipleChoice => {
                if self.options.len() < 2 {
                    return Err(AppError::BadRequest(
                        "Multiple choice questions need at least two options".to_string(),
                    ));
                }
                if self.answer.is_none() {
                    return Err(AppError::BadRequest(
                        "Multiple choice questions need a correct answer".to_string(),
                    ));
                }
            }
            QuestionType::Essay => {
                if !self.options.is_empty() {
                    return Err(AppError::BadRequest(
                        "Essay questions cannot have options".to_string(),
                    ));
                }
            }
        }

        if let Some(url) = &self.image_url {
            Url::parse(url).map_err(|_| AppError::BadRequest("image_url is not a valid URL".to_string()))?;
        }

        let options = if self.options.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&self.options).map_err(|e| {
                AppError::InternalServerError(format!("failed to encode options: {}", e))
            })?)
        };

        let question = clean_html(&self.question);
        if question.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Question text is empty after sanitizing".to_string(),
            ));
        }

        Ok(NewQuestion {
            question_type: self.question_type,
            question,
            options,
            answer: self.answer,
            image_url: self.image_url,
            score: self.score,
        })
    }
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.len() > 10 {
        return Err(validator::ValidationError::new("too_many_options"));
    }
    for opt in options {
        if opt.trim().is_empty() {
            return Err(validator::ValidationError::new("option_cannot_be_empty"));
        }
        if opt.len() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(options: Option<&str>) -> QuestionRow {
        QuestionRow {
            id: 7,
            question_type: QuestionType::MultipleChoice,
            question: "Ibu kota Prancis?".to_string(),
            options: options.map(str::to_string),
            answer: Some("A".to_string()),
            image_url: None,
            score: 10,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn multiple_choice_request() -> QuestionRequest {
        QuestionRequest {
            question_type: QuestionType::MultipleChoice,
            question: "<b>2 + 2?</b><script>alert(1)</script>".to_string(),
            options: vec!["3".to_string(), "4".to_string()],
            answer: Some("B".to_string()),
            image_url: None,
            score: 10,
        }
    }

    #[test]
    fn decodes_options_column() {
        let question = Question::try_from(row(Some(r#"["Paris","Berlin"]"#))).unwrap();
        assert_eq!(question.options, vec!["Paris", "Berlin"]);

        let question = Question::try_from(row(None)).unwrap();
        assert!(question.options.is_empty());
    }

    #[test]
    fn malformed_options_column_is_an_internal_error() {
        let err = Question::try_from(row(Some("not json"))).unwrap_err();
        assert!(matches!(err, AppError::InternalServerError(_)));
    }

    #[test]
    fn answer_is_hidden_from_everyone_but_admins() {
        let question = Question::try_from(row(Some(r#"["Paris","Berlin"]"#))).unwrap();

        for role in [Role::Student, Role::Teacher] {
            let value = serde_json::to_value(question.clone().for_role(role)).unwrap();
            assert!(value.get("answer").is_none(), "answer leaked to {role}");
        }

        let value = serde_json::to_value(question.for_role(Role::Admin)).unwrap();
        assert_eq!(value["answer"], "A");
        assert_eq!(value["type"], "multiple_choice");
    }

    #[test]
    fn request_sanitizes_text_and_encodes_options() {
        let new = multiple_choice_request().into_new_question().unwrap();
        assert_eq!(new.question, "<b>2 + 2?</b>");
        assert_eq!(new.options.as_deref(), Some(r#"["3","4"]"#));
    }

    #[test]
    fn text_that_sanitizes_to_nothing_is_rejected() {
        let mut req = multiple_choice_request();
        req.question = "<script>alert(1)</script>".to_string();
        assert!(matches!(req.into_new_question(), Err(AppError::BadRequest(_))));

        let mut req = multiple_choice_request();
        req.question = "  <style>p {}</style> ".to_string();
        assert!(matches!(req.into_new_question(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn multiple_choice_shape_is_enforced() {
        let mut req = multiple_choice_request();
        req.options.pop();
        assert!(matches!(req.into_new_question(), Err(AppError::BadRequest(_))));

        let mut req = multiple_choice_request();
        req.answer = None;
        assert!(matches!(req.into_new_question(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn essay_rejects_options_and_bad_urls() {
        let mut req = multiple_choice_request();
        req.question_type = QuestionType::Essay;
        assert!(req.into_new_question().is_err());

        let req = QuestionRequest {
            question_type: QuestionType::Essay,
            question: "Describe photosynthesis.".to_string(),
            options: Vec::new(),
            answer: None,
            image_url: Some("not a url".to_string()),
            score: 20,
        };
        assert!(req.into_new_question().is_err());
    }
}
