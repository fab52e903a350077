// src/models/attempt.rs

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// DTO for submitting a finished quiz session.
///
/// Keys are question ids; every question of the set is present, each with
/// the full texts of the selected options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSubmission {
    pub answers: BTreeMap<String, Vec<String>>,
    pub start_time: DateTime<Utc>,
    pub time_taken_seconds: u64,
}

/// Per-question outcome inside an `AttemptResult`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub question_id: String,
    pub is_correct: bool,
    pub user_answer: Vec<String>,
    /// Canonical option texts, already resolved by the backend.
    pub correct_answers: Vec<String>,
}

/// Scored result of one submission, as returned by
/// `POST /quiz/{quiz_id}/submit`. Consumed read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptResult {
    pub quiz_id: String,
    pub attempt_id: String,
    pub results: Vec<AnswerResult>,
    /// Percent score in [0, 100].
    pub score: f64,
    pub total: u32,
    pub correct_answers: u32,
    /// Seconds, serialized as a float by the backend.
    #[serde(default)]
    pub time_taken_seconds: Option<f64>,
}

/// One row of `GET /users/{username}/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptSummary {
    pub id: String,
    pub quiz_id: String,
    pub quiz_title: String,
    pub score: f64,
    pub total_questions: u32,
    pub correct_answers: u32,
    /// Backend timestamps carry no offset, hence the naive type.
    pub completed_at: NaiveDateTime,
    pub difficulty: String,
    /// Seconds, serialized as a float by the backend.
    #[serde(default)]
    pub time_taken_seconds: Option<f64>,
}

/// Per-question review row inside an `AttemptDetail`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptQuestion {
    pub id: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answers: Vec<String>,
    pub user_selected_answers: Vec<String>,
    pub is_correct: bool,
}

/// Full payload of `GET /quiz-attempt/{attempt_id}`, used by the review
/// screen for a single historical attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptDetail {
    pub attempt_id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub score: f64,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub completed_at: NaiveDateTime,
    pub quiz_title: String,
    pub quiz_difficulty: String,
    pub questions: Vec<AttemptQuestion>,
}
