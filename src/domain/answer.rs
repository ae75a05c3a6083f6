use chrono::NaiveDate;
use serde_json::Value;

use super::QuestionType;

pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// Respondent answer, shaped by the question type it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Text(String),
    /// Radio and dropdown.
    Choice(Option<String>),
    /// Checkbox.
    Choices(Vec<String>),
    Rating(Option<u8>),
    Date(Option<NaiveDate>),
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AnswerError {
    #[error("answer for a {question_type} question must be {expected}")]
    ShapeMismatch {
        question_type: QuestionType,
        expected: &'static str,
    },
    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(String),
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

impl Answer {
    pub fn empty_for(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::Text => Answer::Text(String::new()),
            QuestionType::Radio | QuestionType::Dropdown => Answer::Choice(None),
            QuestionType::Checkbox => Answer::Choices(Vec::new()),
            QuestionType::Rating => Answer::Rating(None),
            QuestionType::Date => Answer::Date(None),
        }
    }

    pub fn fits(&self, question_type: QuestionType) -> bool {
        matches!(
            (self, question_type),
            (Answer::Text(_), QuestionType::Text)
                | (
                    Answer::Choice(_),
                    QuestionType::Radio | QuestionType::Dropdown
                )
                | (Answer::Choices(_), QuestionType::Checkbox)
                | (Answer::Rating(_), QuestionType::Rating)
                | (Answer::Date(_), QuestionType::Date)
        )
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Answer::Text(text) => text.is_empty(),
            Answer::Choice(choice) => choice.is_none(),
            Answer::Choices(choices) => choices.is_empty(),
            Answer::Rating(rating) => rating.is_none(),
            Answer::Date(date) => date.is_none(),
        }
    }

    /// Wire form: strings for scalar answers (empty when unanswered), an array
    /// for checkbox answers, a numeric string for ratings.
    pub fn to_wire(&self) -> Value {
        match self {
            Answer::Text(text) => Value::String(text.clone()),
            Answer::Choice(choice) => Value::String(choice.clone().unwrap_or_default()),
            Answer::Choices(choices) => {
                Value::Array(choices.iter().cloned().map(Value::String).collect())
            }
            Answer::Rating(rating) => {
                Value::String(rating.map(|r| r.to_string()).unwrap_or_default())
            }
            Answer::Date(date) => Value::String(
                date.map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ),
        }
    }

    pub fn from_wire(question_type: QuestionType, value: &Value) -> Result<Self, AnswerError> {
        if value.is_null() {
            return Ok(Answer::empty_for(question_type));
        }

        match question_type {
            QuestionType::Text => scalar(question_type, value).map(Answer::Text),
            QuestionType::Radio | QuestionType::Dropdown => scalar(question_type, value)
                .map(|s| Answer::Choice(Some(s).filter(|s| !s.is_empty()))),
            QuestionType::Checkbox => match value {
                Value::String(s) if s.is_empty() => Ok(Answer::Choices(Vec::new())),
                Value::Array(items) => items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => Ok(s.clone()),
                        _ => Err(mismatch(question_type)),
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Answer::Choices),
                _ => Err(mismatch(question_type)),
            },
            QuestionType::Rating => {
                let raw = match value {
                    Value::Number(n) => n.to_string(),
                    Value::String(s) => s.trim().to_string(),
                    _ => return Err(mismatch(question_type)),
                };
                if raw.is_empty() {
                    return Ok(Answer::Rating(None));
                }
                match raw.parse::<u8>() {
                    Ok(r) if (RATING_MIN..=RATING_MAX).contains(&r) => Ok(Answer::Rating(Some(r))),
                    _ => Err(AnswerError::RatingOutOfRange(raw)),
                }
            }
            QuestionType::Date => {
                let raw = scalar(question_type, value)?;
                if raw.is_empty() {
                    return Ok(Answer::Date(None));
                }
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map(|d| Answer::Date(Some(d)))
                    .map_err(|_| AnswerError::InvalidDate(raw))
            }
        }
    }
}

fn scalar(question_type: QuestionType, value: &Value) -> Result<String, AnswerError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(mismatch(question_type)),
    }
}

fn mismatch(question_type: QuestionType) -> AnswerError {
    let expected = match question_type {
        QuestionType::Checkbox => "an array of strings",
        QuestionType::Rating => "a numeric string",
        QuestionType::Date => "a YYYY-MM-DD string",
        _ => "a string",
    };
    AnswerError::ShapeMismatch {
        question_type,
        expected,
    }
}
