mod in_memory_quiz_repository;
mod pg_quiz_repository;

pub use in_memory_quiz_repository::InMemoryQuizRepository;
pub use pg_quiz_repository::PgQuizRepository;
