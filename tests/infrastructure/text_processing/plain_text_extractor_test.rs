use bytes::Bytes;

use quizpress::application::ports::{ExtractorError, TextExtractor};
use quizpress::domain::{BlockKind, SourceDocument, SourceFormat};
use quizpress::infrastructure::text_processing::PlainTextExtractor;

fn txt(data: &[u8]) -> (Bytes, SourceDocument) {
    let document = SourceDocument::new("q.txt".to_string(), SourceFormat::PlainText, data.len() as u64);
    (Bytes::copy_from_slice(data), document)
}

#[tokio::test]
async fn given_lines_with_blanks_when_extracting_then_one_block_per_non_empty_line() {
    let (data, document) = txt("\u{FEFF}1. Q\r\n\r\n   \na)  yes\nb) no\n".as_bytes());

    let blocks = PlainTextExtractor.extract_blocks(data, &document).await.unwrap();

    let values: Vec<&str> = blocks.iter().map(|b| b.value.as_str()).collect();
    assert_eq!(values, vec!["1. Q", "a) yes", "b) no"]);
    assert!(blocks.iter().all(|b| b.kind == BlockKind::Text));
    let indices: Vec<usize> = blocks.iter().map(|b| b.sequence_index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[tokio::test]
async fn given_invalid_utf8_when_extracting_then_extraction_failed() {
    let (data, document) = txt(&[0x31, 0x2E, 0xFF, 0xFE]);

    let result = PlainTextExtractor.extract_blocks(data, &document).await;

    assert!(matches!(result, Err(ExtractorError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_docx_document_when_extracting_as_text_then_unsupported() {
    let document = SourceDocument::new("q.docx".to_string(), SourceFormat::Docx, 0);

    let result = PlainTextExtractor
        .extract_blocks(Bytes::new(), &document)
        .await;

    assert!(matches!(result, Err(ExtractorError::UnsupportedFormat(_))));
}

#[test]
fn given_text_when_iterating_blocks_then_iterator_is_lazy_and_ordered() {
    let mut blocks = PlainTextExtractor::blocks("first\n\nsecond\nthird");

    assert_eq!(blocks.next().map(|b| b.value), Some("first".to_string()));
    assert_eq!(blocks.next().map(|b| b.sequence_index), Some(1));
}

#[test]
fn given_thai_quiz_lines_when_splitting_then_text_is_kept_verbatim() {
    let values: Vec<String> = PlainTextExtractor::blocks("1. คำถามข้อแรก\nก. น้ำ\nข. ดำ\n")
        .map(|b| b.value)
        .collect();

    assert_eq!(values, vec!["1. คำถามข้อแรก", "ก. น้ำ", "ข. ดำ"]);
}
