mod plain_text_extractor_test;
mod text_sanitizer_test;
