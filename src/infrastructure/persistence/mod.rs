mod pg_pool;
mod repositories;

pub use repositories::InMemoryQuizRepository;
pub use repositories::PgQuizRepository;

pub use pg_pool::{PoolConfig, connect_pool};
