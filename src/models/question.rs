// src/models/question.rs

use serde::{Deserialize, Serialize};

/// A multiple-choice question as served by the quiz endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,

    /// The prompt shown to the user.
    #[serde(rename = "question")]
    pub text: String,

    /// Ordered option texts. The order defines the positional letter
    /// mapping: index 0 is "A", index 1 is "B", and so on.
    pub options: Vec<String>,

    /// Correct-option references. Each entry is either a single positional
    /// letter ("A", "B", ...) or the full option text verbatim.
    pub correct_answers: Vec<String>,
}

impl Question {
    /// Positional letter for an option index ("A" for 0, "B" for 1, ...).
    pub fn option_letter(index: usize) -> char {
        (b'A' + index as u8) as char
    }
}
