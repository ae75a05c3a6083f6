use super::{Answer, AnswerOption, ImageHandle, Question, QuestionType, Quiz, QuizId};

/// Authoring state of a quiz that has not been published yet.
///
/// Edits go through [`QuizDraft::apply`], which consumes the draft and
/// returns the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizDraft {
    pub id: QuizId,
    pub title: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DraftCommand {
    SetTitle(String),
    AddQuestion {
        question_type: QuestionType,
    },
    DeleteQuestion {
        question: usize,
    },
    SetQuestionText {
        question: usize,
        text: String,
    },
    SetQuestionType {
        question: usize,
        question_type: QuestionType,
    },
    AddOption {
        question: usize,
    },
    DeleteOption {
        question: usize,
        option: usize,
    },
    SetOptionText {
        question: usize,
        option: usize,
        text: String,
    },
    AttachQuestionImage {
        question: usize,
        image: Option<ImageHandle>,
    },
    AttachOptionImage {
        question: usize,
        option: usize,
        image: Option<ImageHandle>,
    },
    SetAnswer {
        question: usize,
        answer: Answer,
    },
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DraftError {
    #[error("question {0} does not exist")]
    QuestionOutOfRange(usize),
    #[error("option {option} of question {question} does not exist")]
    OptionOutOfRange { question: usize, option: usize },
    #[error("question {question} is a {question_type} question and has no options")]
    NotOptionBearing {
        question: usize,
        question_type: QuestionType,
    },
    #[error("answer does not fit {question_type} question {question}")]
    AnswerMismatch {
        question: usize,
        question_type: QuestionType,
    },
    #[error("question {question} is a {question_type} question but has {options} options")]
    InconsistentOptions {
        question: usize,
        question_type: QuestionType,
        options: usize,
    },
}

impl QuizDraft {
    pub fn new(id: QuizId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            questions: Vec::new(),
        }
    }

    pub fn apply(mut self, command: DraftCommand) -> Result<Self, DraftError> {
        match command {
            DraftCommand::SetTitle(title) => self.title = title,
            DraftCommand::AddQuestion { question_type } => {
                let mut question =
                    Question::new(self.questions.len() as u32 + 1, "", question_type);
                if question_type.is_option_bearing() {
                    question.options.push(AnswerOption::new(""));
                }
                self.questions.push(question);
            }
            DraftCommand::DeleteQuestion { question } => {
                self.question_mut(question)?;
                self.questions.remove(question);
            }
            DraftCommand::SetQuestionText { question, text } => {
                self.question_mut(question)?.text = text;
            }
            DraftCommand::SetQuestionType {
                question,
                question_type,
            } => {
                let target = self.question_mut(question)?;
                target.question_type = question_type;
                target.answer = Answer::empty_for(question_type);
                if !question_type.is_option_bearing() {
                    target.options.clear();
                } else if target.options.is_empty() {
                    target.options.push(AnswerOption::new(""));
                }
            }
            DraftCommand::AddOption { question } => {
                self.option_bearing_mut(question)?
                    .options
                    .push(AnswerOption::new(""));
            }
            DraftCommand::DeleteOption { question, option } => {
                let target = self.option_bearing_mut(question)?;
                if option >= target.options.len() {
                    return Err(DraftError::OptionOutOfRange { question, option });
                }
                target.options.remove(option);
            }
            DraftCommand::SetOptionText {
                question,
                option,
                text,
            } => {
                self.option_mut(question, option)?.text = text;
            }
            DraftCommand::AttachQuestionImage { question, image } => {
                self.question_mut(question)?.image = image;
            }
            DraftCommand::AttachOptionImage {
                question,
                option,
                image,
            } => {
                self.option_mut(question, option)?.image = image;
            }
            DraftCommand::SetAnswer { question, answer } => {
                let target = self.question_mut(question)?;
                if !answer.fits(target.question_type) {
                    return Err(DraftError::AnswerMismatch {
                        question,
                        question_type: target.question_type,
                    });
                }
                target.answer = answer;
            }
        }

        Ok(self)
    }

    /// Validates the option invariant and produces the publishable quiz.
    pub fn finish(self) -> Result<Quiz, DraftError> {
        let mut questions = self.questions;
        for (index, question) in questions.iter_mut().enumerate() {
            if !question.has_consistent_options() {
                return Err(DraftError::InconsistentOptions {
                    question: index,
                    question_type: question.question_type,
                    options: question.options.len(),
                });
            }
            question.local_id = index as u32 + 1;
        }

        Ok(Quiz {
            id: self.id,
            title: self.title,
            questions,
        })
    }

    fn question_mut(&mut self, question: usize) -> Result<&mut Question, DraftError> {
        self.questions
            .get_mut(question)
            .ok_or(DraftError::QuestionOutOfRange(question))
    }

    fn option_bearing_mut(&mut self, question: usize) -> Result<&mut Question, DraftError> {
        let target = self.question_mut(question)?;
        if !target.question_type.is_option_bearing() {
            return Err(DraftError::NotOptionBearing {
                question,
                question_type: target.question_type,
            });
        }
        Ok(target)
    }

    fn option_mut(&mut self, question: usize, option: usize) -> Result<&mut AnswerOption, DraftError> {
        self.option_bearing_mut(question)?
            .options
            .get_mut(option)
            .ok_or(DraftError::OptionOutOfRange { question, option })
    }
}
