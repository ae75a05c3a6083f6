mod create_quiz;
mod get_quiz;
mod health;
mod import_quiz;
mod list_quizzes;
pub mod quiz_types;
mod serve_image;

pub use create_quiz::create_quiz_handler;
pub use get_quiz::get_quiz_handler;
pub use health::health_handler;
pub use import_quiz::{ImportParams, import_quiz_handler};
pub use list_quizzes::list_quizzes_handler;
pub use serve_image::serve_image_handler;
