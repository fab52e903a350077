// src/models/quiz.rs

use serde::{Deserialize, Serialize};

use crate::models::question::Question;

/// Quiz metadata as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizInfo {
    pub id: String,
    pub title: String,
    pub difficulty: String,
    pub num_questions: u32,
    pub created_at: String,
}

/// Full payload of `GET /quiz/{quiz_id}`: the quiz metadata plus its
/// question set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizDetail {
    pub quiz: QuizInfo,
    pub questions: Vec<Question>,
}
