// tests/answer_tests.rs

use quizium_client::answers::{Classification, classify, normalize};

fn options() -> Vec<String> {
    vec![
        "Red".to_string(),
        "Green".to_string(),
        "Blue".to_string(),
        "Yellow".to_string(),
    ]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn normalize_resolves_in_range_letters() {
    let options = options();

    assert_eq!(normalize("A", &options), "Red");
    assert_eq!(normalize("B", &options), "Green");
    assert_eq!(normalize("D", &options), "Yellow");
}

#[test]
fn normalize_leaves_everything_else_unchanged() {
    let options = options();

    // Out-of-range letter
    assert_eq!(normalize("E", &options), "E");
    // Lowercase is not a positional reference
    assert_eq!(normalize("a", &options), "a");
    // Multi-character strings are already-canonical text
    assert_eq!(normalize("AB", &options), "AB");
    assert_eq!(normalize("Green", &options), "Green");
    assert_eq!(normalize("", &options), "");
    // Non-letter single characters
    assert_eq!(normalize("1", &options), "1");
}

#[test]
fn classify_empty_correct_set_is_not_applicable() {
    let result = classify(&[], &strings(&["Red"]), &options());
    assert_eq!(result, Classification::NotApplicable);
}

#[test]
fn classify_exact_match_is_correct() {
    let result = classify(
        &strings(&["A", "C"]),
        &strings(&["Red", "Blue"]),
        &options(),
    );
    assert_eq!(result, Classification::Correct);
}

#[test]
fn classify_is_symmetric_under_letter_and_text_references() {
    let user = strings(&["Red", "Blue"]);

    let by_letter = classify(&strings(&["A", "C"]), &user, &options());
    let by_text = classify(&strings(&["Red", "Blue"]), &user, &options());
    let mixed = classify(&strings(&["A", "Blue"]), &user, &options());

    assert_eq!(by_letter, by_text);
    assert_eq!(by_letter, mixed);
    assert_eq!(by_letter, Classification::Correct);
}

#[test]
fn classify_partial_overlap() {
    let result = classify(&strings(&["A", "B", "C"]), &strings(&["Red"]), &options());
    assert_eq!(
        result,
        Classification::Partial {
            matched: 1,
            expected: 3
        }
    );
}

#[test]
fn classify_no_answer() {
    let result = classify(&strings(&["A"]), &[], &options());
    assert_eq!(result, Classification::NoAnswer);
}

#[test]
fn classify_zero_overlap_is_incorrect() {
    let result = classify(&strings(&["A"]), &strings(&["Green", "Blue"]), &options());
    assert_eq!(result, Classification::Incorrect);
}

#[test]
fn classify_extra_selections_fail_the_size_gate() {
    // Every correct option selected, plus a wrong one: full overlap but
    // unequal sizes, so this must not count as Correct.
    let result = classify(
        &strings(&["A", "B"]),
        &strings(&["Red", "Green", "Blue"]),
        &options(),
    );
    assert_eq!(result, Classification::Incorrect);
}

#[test]
fn classify_collapses_duplicate_selections() {
    let result = classify(&strings(&["A"]), &strings(&["Red", "Red"]), &options());
    assert_eq!(result, Classification::Correct);
}

#[test]
fn classification_display_matches_review_labels() {
    assert_eq!(Classification::Correct.to_string(), "Correct");
    assert_eq!(
        Classification::Partial {
            matched: 2,
            expected: 3
        }
        .to_string(),
        "2/3 Correct"
    );
    assert_eq!(Classification::Incorrect.to_string(), "Incorrect");
    assert_eq!(Classification::NoAnswer.to_string(), "No Answer");
    assert_eq!(Classification::NotApplicable.to_string(), "N/A");
}
