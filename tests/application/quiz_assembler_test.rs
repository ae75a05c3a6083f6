use quizpress::application::services::assemble_quiz;
use quizpress::domain::{Question, QuestionType};

#[test]
fn given_questions_with_gaps_in_ids_when_assembling_then_ids_are_renumbered_in_order() {
    let questions = vec![
        Question::new(7, "first", QuestionType::Text),
        Question::new(3, "second", QuestionType::Text),
        Question::new(3, "third", QuestionType::Text),
    ];

    let quiz = assemble_quiz("Unit 1", questions);

    assert_eq!(quiz.title, "Unit 1");
    for (i, question) in quiz.questions.iter().enumerate() {
        assert_eq!(question.local_id, i as u32 + 1);
    }
    let texts: Vec<&str> = quiz.questions.iter().map(|q| q.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[test]
fn given_no_questions_when_assembling_then_quiz_is_empty() {
    let quiz = assemble_quiz("Empty", Vec::new());

    assert!(quiz.questions.is_empty());
}

#[test]
fn given_empty_title_when_assembling_then_quiz_is_still_produced() {
    let quiz = assemble_quiz("", vec![Question::new(1, "Q", QuestionType::Text)]);

    assert_eq!(quiz.title, "");
    assert_eq!(quiz.questions.len(), 1);
}

#[test]
fn given_two_assemblies_when_comparing_ids_then_each_quiz_gets_a_fresh_id() {
    let first = assemble_quiz("A", Vec::new());
    let second = assemble_quiz("A", Vec::new());

    assert_ne!(first.id, second.id);
}
