// src/answers.rs
//
// A correct answer can be referenced two ways: by positional letter
// ("A", "B", ...) or by the full option text. Everything that compares
// answers funnels through `normalize` so the two representations can
// never drift apart.

use std::collections::HashSet;
use std::fmt;

/// Per-question correctness category assigned during review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Correct,
    /// Some but not all of the correct options were selected.
    Partial { matched: usize, expected: usize },
    Incorrect,
    NoAnswer,
    /// The question carries no correct answers to grade against.
    NotApplicable,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Correct => write!(f, "Correct"),
            Classification::Partial { matched, expected } => {
                write!(f, "{}/{} Correct", matched, expected)
            }
            Classification::Incorrect => write!(f, "Incorrect"),
            Classification::NoAnswer => write!(f, "No Answer"),
            Classification::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// Resolves an answer reference to canonical option text.
///
/// A reference that is exactly one ASCII uppercase letter whose alphabet
/// offset indexes into `options` resolves to that option's text. Anything
/// else is returned unchanged, treated as already-canonical text.
pub fn normalize(reference: &str, options: &[String]) -> String {
    let mut chars = reference.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        if letter.is_ascii_uppercase() {
            let offset = (letter as usize) - ('A' as usize);
            if let Some(option) = options.get(offset) {
                return option.clone();
            }
        }
    }
    reference.to_string()
}

/// Grades one question's selections against its correct answers.
///
/// Both inputs collapse to sets: duplicates and ordering are irrelevant.
/// `Correct` requires full overlap AND equal sizes, so extra wrong
/// selections alongside every correct one still fail the gate.
pub fn classify(
    correct_answers: &[String],
    user_answers: &[String],
    options: &[String],
) -> Classification {
    let correct: HashSet<String> = correct_answers
        .iter()
        .map(|reference| normalize(reference, options))
        .collect();
    let user: HashSet<&str> = user_answers.iter().map(String::as_str).collect();

    if correct.is_empty() {
        return Classification::NotApplicable;
    }

    let matched = user
        .iter()
        .filter(|&&selection| correct.contains(selection))
        .count();

    if matched == correct.len() && user.len() == correct.len() {
        Classification::Correct
    } else if matched > 0 && matched < correct.len() {
        Classification::Partial {
            matched,
            expected: correct.len(),
        }
    } else if user.is_empty() {
        Classification::NoAnswer
    } else {
        Classification::Incorrect
    }
}
