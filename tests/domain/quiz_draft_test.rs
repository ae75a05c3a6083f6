use quizpress::domain::{
    Answer, DraftCommand, DraftError, ImageHandle, QuestionType, QuizDraft, QuizId,
};

fn draft_with(question_type: QuestionType) -> QuizDraft {
    QuizDraft::new(QuizId::new(), "Draft")
        .apply(DraftCommand::AddQuestion { question_type })
        .unwrap()
}

#[test]
fn given_option_bearing_question_when_added_then_one_empty_option_is_seeded() {
    let draft = draft_with(QuestionType::Checkbox);

    assert_eq!(draft.questions[0].options.len(), 1);
    assert_eq!(draft.questions[0].options[0].text, "");
    assert_eq!(draft.questions[0].answer, Answer::Choices(vec![]));
}

#[test]
fn given_text_question_when_adding_option_then_not_option_bearing_error() {
    let result = draft_with(QuestionType::Text).apply(DraftCommand::AddOption { question: 0 });

    assert!(matches!(result, Err(DraftError::NotOptionBearing { .. })));
}

#[test]
fn given_radio_question_when_switching_to_text_then_options_clear_and_answer_resets() {
    let draft = draft_with(QuestionType::Radio)
        .apply(DraftCommand::SetAnswer {
            question: 0,
            answer: Answer::Choice(Some("a".into())),
        })
        .unwrap()
        .apply(DraftCommand::SetQuestionType {
            question: 0,
            question_type: QuestionType::Text,
        })
        .unwrap();

    assert!(draft.questions[0].options.is_empty());
    assert_eq!(draft.questions[0].answer, Answer::Text(String::new()));
}

#[test]
fn given_text_question_when_switching_to_dropdown_then_one_option_is_seeded() {
    let draft = draft_with(QuestionType::Text)
        .apply(DraftCommand::SetQuestionType {
            question: 0,
            question_type: QuestionType::Dropdown,
        })
        .unwrap();

    assert_eq!(draft.questions[0].options.len(), 1);
    assert_eq!(draft.questions[0].answer, Answer::Choice(None));
}

#[test]
fn given_mismatched_answer_when_setting_then_rejected() {
    let result = draft_with(QuestionType::Rating).apply(DraftCommand::SetAnswer {
        question: 0,
        answer: Answer::Text("five".into()),
    });

    assert!(matches!(result, Err(DraftError::AnswerMismatch { .. })));
}

#[test]
fn given_missing_indices_when_editing_then_out_of_range_errors() {
    let draft = draft_with(QuestionType::Radio);

    assert_eq!(
        draft.clone().apply(DraftCommand::DeleteQuestion { question: 3 }),
        Err(DraftError::QuestionOutOfRange(3))
    );
    assert_eq!(
        draft.apply(DraftCommand::SetOptionText {
            question: 0,
            option: 2,
            text: "x".into(),
        }),
        Err(DraftError::OptionOutOfRange {
            question: 0,
            option: 2
        })
    );
}

#[test]
fn given_radio_question_with_all_options_deleted_when_finishing_then_inconsistent() {
    let result = draft_with(QuestionType::Radio)
        .apply(DraftCommand::DeleteOption {
            question: 0,
            option: 0,
        })
        .unwrap()
        .finish();

    assert!(matches!(result, Err(DraftError::InconsistentOptions { .. })));
}

#[test]
fn given_edited_draft_when_finishing_then_quiz_has_renumbered_questions() {
    let id = QuizId::new();
    let quiz = QuizDraft::new(id, "Old")
        .apply(DraftCommand::SetTitle("Geography".into()))
        .unwrap()
        .apply(DraftCommand::AddQuestion {
            question_type: QuestionType::Text,
        })
        .unwrap()
        .apply(DraftCommand::AddQuestion {
            question_type: QuestionType::Radio,
        })
        .unwrap()
        .apply(DraftCommand::SetQuestionText {
            question: 1,
            text: "Capital of Peru?".into(),
        })
        .unwrap()
        .apply(DraftCommand::SetOptionText {
            question: 1,
            option: 0,
            text: "Lima".into(),
        })
        .unwrap()
        .apply(DraftCommand::AttachOptionImage {
            question: 1,
            option: 0,
            image: Some(ImageHandle::Url("/images/lima.png".into())),
        })
        .unwrap()
        .apply(DraftCommand::DeleteQuestion { question: 0 })
        .unwrap()
        .finish()
        .unwrap();

    assert_eq!(quiz.id, id);
    assert_eq!(quiz.title, "Geography");
    assert_eq!(quiz.questions.len(), 1);
    assert_eq!(quiz.questions[0].local_id, 1);
    assert_eq!(quiz.questions[0].text, "Capital of Peru?");
    assert_eq!(
        quiz.questions[0].options[0].image,
        Some(ImageHandle::Url("/images/lima.png".into()))
    );
}
