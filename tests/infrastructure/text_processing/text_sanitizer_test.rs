use quizpress::infrastructure::text_processing::normalize_line;

#[test]
fn given_internal_whitespace_runs_when_normalizing_then_collapsed_to_single_spaces() {
    assert_eq!(normalize_line("  a)\t\tfour   legs  "), "a) four legs");
}

#[test]
fn given_zero_width_characters_when_normalizing_then_removed() {
    assert_eq!(normalize_line("\u{FEFF}1.\u{200B} What\u{200D}?"), "1. What?");
}

#[test]
fn given_decomposed_accent_when_normalizing_then_composed() {
    assert_eq!(normalize_line("cafe\u{0301}"), "caf\u{00E9}");
}

#[test]
fn given_thai_sara_am_when_normalizing_then_code_points_are_unchanged() {
    assert_eq!(normalize_line("1. คำถามข้อแรก"), "1. คำถามข้อแรก");
    assert_eq!(normalize_line("ก. น้ำ"), "ก. น้ำ");
    assert!(normalize_line("ข. ดำ").contains('\u{0E33}'));
}

#[test]
fn given_whitespace_only_line_when_normalizing_then_empty() {
    assert_eq!(normalize_line(" \u{00A0}\t "), "");
}

#[test]
fn given_thai_text_when_normalizing_then_preserved() {
    assert_eq!(normalize_line("ก.  สวัสดี"), "ก. สวัสดี");
}
