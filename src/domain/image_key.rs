use std::fmt;

use uuid::Uuid;

use super::QuizId;

/// Object key of a stored image, relative to the image store root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageKey(String);

impl ImageKey {
    pub fn new(quiz_id: &QuizId, extension: &str) -> Self {
        Self(format!(
            "quizzes/{}/{}.{}",
            quiz_id.as_uuid(),
            Uuid::new_v4(),
            extension
        ))
    }

    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Rejects keys that climb out of the store root.
    pub fn is_safe(&self) -> bool {
        !self.0.is_empty()
            && !self.0.starts_with('/')
            && self.0.split('/').all(|segment| segment != ".." && !segment.is_empty())
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
