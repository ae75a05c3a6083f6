use std::fmt;
use std::str::FromStr;

use super::{Answer, ImageHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    Text,
    Radio,
    Checkbox,
    Dropdown,
    Rating,
    Date,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Radio => "radio",
            QuestionType::Checkbox => "checkbox",
            QuestionType::Dropdown => "dropdown",
            QuestionType::Rating => "rating",
            QuestionType::Date => "date",
        }
    }

    /// Radio, checkbox and dropdown questions carry a non-empty option list.
    pub fn is_option_bearing(&self) -> bool {
        matches!(
            self,
            QuestionType::Radio | QuestionType::Checkbox | QuestionType::Dropdown
        )
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" | "text_input" => Ok(QuestionType::Text),
            "radio" => Ok(QuestionType::Radio),
            "checkbox" => Ok(QuestionType::Checkbox),
            "dropdown" => Ok(QuestionType::Dropdown),
            "rating" => Ok(QuestionType::Rating),
            "date" => Ok(QuestionType::Date),
            _ => Err(format!("Invalid question type: {}", s)),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOption {
    pub text: String,
    pub image: Option<ImageHandle>,
}

impl AnswerOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub local_id: u32,
    pub text: String,
    pub question_type: QuestionType,
    pub image: Option<ImageHandle>,
    pub options: Vec<AnswerOption>,
    pub answer: Answer,
}

impl Question {
    pub fn new(local_id: u32, text: impl Into<String>, question_type: QuestionType) -> Self {
        Self {
            local_id,
            text: text.into(),
            question_type,
            image: None,
            options: Vec::new(),
            answer: Answer::empty_for(question_type),
        }
    }

    /// Options are present exactly when the type is option-bearing.
    pub fn has_consistent_options(&self) -> bool {
        self.options.is_empty() != self.question_type.is_option_bearing()
    }

    pub fn images_mut(&mut self) -> impl Iterator<Item = &mut ImageHandle> {
        self.image
            .iter_mut()
            .chain(self.options.iter_mut().filter_map(|o| o.image.as_mut()))
    }
}
