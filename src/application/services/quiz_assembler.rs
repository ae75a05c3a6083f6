use crate::domain::{Question, Quiz};

/// Wraps segmented questions into a quiz with a fresh id, renumbering local
/// ids to `1..=n` in input order.
pub fn assemble_quiz(title: impl Into<String>, mut questions: Vec<Question>) -> Quiz {
    let title = title.into();
    if title.trim().is_empty() {
        tracing::warn!(question_count = questions.len(), "Assembling quiz with empty title");
    }

    for (index, question) in questions.iter_mut().enumerate() {
        question.local_id = index as u32 + 1;
    }

    Quiz::new(title, questions)
}
