mod image_handle_test;
mod quiz_draft_test;
