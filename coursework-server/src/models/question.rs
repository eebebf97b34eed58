//! Trivia question payloads

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Maximum length for question and answer text
const MAX_TEXT_LEN: usize = 1000;

/// Difficulty scale used by the trivia frontend
pub const MIN_DIFFICULTY: i32 = 1;
pub const MAX_DIFFICULTY: i32 = 5;

/// An integer the frontend may send as a number or a numeric string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LenientInt {
    Number(i64),
    Text(String),
}

impl LenientInt {
    pub fn to_i32(&self, field: &'static str) -> Result<i32, ValidationError> {
        let invalid = ValidationError::InvalidFormat {
            field,
            reason: "must be a whole number",
        };
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<i64>().map_err(|_| invalid.clone())?,
        };
        i32::try_from(n).map_err(|_| invalid)
    }
}

/// Body of `POST /questions`: either a new question or a search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionsPost {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<LenientInt>,
    pub category: Option<LenientInt>,
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

/// What a `POST /questions` body asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionsIntent {
    Create,
    Search(String),
    Unknown,
}

impl QuestionsPost {
    /// Any question field wins over `searchTerm`.
    pub fn intent(&self) -> QuestionsIntent {
        if self.question.is_some()
            || self.answer.is_some()
            || self.difficulty.is_some()
            || self.category.is_some()
        {
            QuestionsIntent::Create
        } else if let Some(term) = &self.search_term {
            QuestionsIntent::Search(term.clone())
        } else {
            QuestionsIntent::Unknown
        }
    }

    /// Validate the create form; the first failure is reported.
    pub fn to_new_question(&self) -> Result<NewQuestion, ValidationError> {
        let question = required(&self.question, "question")?;
        let answer = required(&self.answer, "answer")?;

        let difficulty = self
            .difficulty
            .as_ref()
            .ok_or(ValidationError::Missing { field: "difficulty" })?
            .to_i32("difficulty")?;
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(ValidationError::OutOfRange {
                field: "difficulty",
                min: MIN_DIFFICULTY as i64,
                max: MAX_DIFFICULTY as i64,
            });
        }

        let category = self
            .category
            .as_ref()
            .ok_or(ValidationError::Missing { field: "category" })?
            .to_i32("category")?;

        Ok(NewQuestion {
            question,
            answer,
            difficulty,
            category,
        })
    }
}

fn required(value: &Option<String>, field: &'static str) -> Result<String, ValidationError> {
    let text = value.as_deref().ok_or(ValidationError::Missing { field })?.trim();
    if text.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if text.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_TEXT_LEN,
        });
    }
    Ok(text.to_owned())
}

/// Validated question ready for INSERT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    pub category: i32,
}

/// `quiz_category` as sent by the play screen: `{"id": 1, "type": "Science"}`
/// or a bare id. Id 0 means every category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum QuizCategory {
    Object {
        id: LenientInt,
        #[serde(rename = "type")]
        kind: Option<String>,
    },
    Id(LenientInt),
}

impl QuizCategory {
    /// `None` for "all categories".
    pub fn category_id(&self) -> Result<Option<i32>, ValidationError> {
        let id = match self {
            Self::Object { id, .. } | Self::Id(id) => id.to_i32("quiz_category")?,
        };
        Ok((id != 0).then_some(id))
    }
}

/// Body of `POST /quizzes`
#[derive(Debug, Clone, Deserialize)]
pub struct QuizRequest {
    pub previous_questions: Option<Vec<i32>>,
    pub quiz_category: Option<QuizCategory>,
}

/// Question as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

/// Category as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: i32,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}
