// src/review.rs
//
// Pure projections over attempt results: per-question classification,
// aggregate statistics across attempts, and per-quiz progression
// grouping. No network calls; deterministic given their inputs.

use std::collections::HashMap;

use crate::answers::{self, Classification};
use crate::models::{
    attempt::{AnswerResult, AttemptQuestion, AttemptSummary},
    question::Question,
};

/// Aggregate statistics across a set of attempts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverallStats {
    pub global_score_percent: f64,
    pub total_correct: u64,
    pub total_questions: u64,
    pub total_incorrect: u64,
    pub total_time_seconds: f64,
}

/// Score movement of one attempt relative to the immediately-older
/// attempt of the same quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Improved,
    Declined,
    Flat,
}

/// Display band for a percent score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

/// All attempts of one quiz, newest first.
#[derive(Debug, Clone)]
pub struct QuizGroup {
    pub quiz_title: String,
    pub difficulty: String,
    pub attempts: Vec<AttemptSummary>,
}

impl QuizGroup {
    /// Trend of the attempt at `index` against the next (older) one.
    /// The oldest attempt has nothing to compare against.
    pub fn trend_at(&self, index: usize) -> Option<Trend> {
        let attempt = self.attempts.get(index)?;
        let older = self.attempts.get(index + 1)?;
        Some(if attempt.score > older.score {
            Trend::Improved
        } else if attempt.score < older.score {
            Trend::Declined
        } else {
            Trend::Flat
        })
    }

    pub fn best_score(&self) -> f64 {
        self.attempts.iter().map(|a| a.score).fold(0.0, f64::max)
    }

    pub fn average_score(&self) -> f64 {
        if self.attempts.is_empty() {
            return 0.0;
        }
        self.attempts.iter().map(|a| a.score).sum::<f64>() / self.attempts.len() as f64
    }

    pub fn total_time_seconds(&self) -> f64 {
        self.attempts
            .iter()
            .map(|a| a.time_taken_seconds.unwrap_or(0.0))
            .sum()
    }
}

/// Classifies one question of a fresh attempt result. The question's own
/// correct-answer references (letters or full text) are graded against
/// the selections echoed back by the backend.
pub fn classify_question(question: &Question, result: &AnswerResult) -> Classification {
    answers::classify(
        &question.correct_answers,
        &result.user_answer,
        &question.options,
    )
}

/// Classifies one question of a historical attempt detail.
pub fn classify_attempt_question(question: &AttemptQuestion) -> Classification {
    answers::classify(
        &question.correct_answers,
        &question.user_selected_answers,
        &question.options,
    )
}

/// Sums correct/total/time across attempts. Empty input yields all
/// zeros; the score never divides by zero.
pub fn aggregate(attempts: &[AttemptSummary]) -> OverallStats {
    let mut stats = OverallStats::default();
    for attempt in attempts {
        stats.total_correct += u64::from(attempt.correct_answers);
        stats.total_questions += u64::from(attempt.total_questions);
        stats.total_time_seconds += attempt.time_taken_seconds.unwrap_or(0.0);
    }
    stats.total_incorrect = stats.total_questions - stats.total_correct;
    if stats.total_questions > 0 {
        stats.global_score_percent =
            stats.total_correct as f64 / stats.total_questions as f64 * 100.0;
    }
    stats
}

/// Groups attempts by quiz id to show progression. Within each group,
/// attempts are sorted by completion date, newest first.
pub fn group_by_quiz(attempts: &[AttemptSummary]) -> HashMap<String, QuizGroup> {
    let mut grouped: HashMap<String, QuizGroup> = HashMap::new();
    for attempt in attempts {
        grouped
            .entry(attempt.quiz_id.clone())
            .or_insert_with(|| QuizGroup {
                quiz_title: attempt.quiz_title.clone(),
                difficulty: attempt.difficulty.clone(),
                attempts: Vec::new(),
            })
            .attempts
            .push(attempt.clone());
    }
    for group in grouped.values_mut() {
        group
            .attempts
            .sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    }
    grouped
}

pub fn score_band(score: f64) -> ScoreBand {
    if score >= 80.0 {
        ScoreBand::High
    } else if score >= 60.0 {
        ScoreBand::Medium
    } else {
        ScoreBand::Low
    }
}

/// Human-readable duration ("1h 2m 5s", "2m 5s", "45s"), "N/A" when no
/// time was recorded.
pub fn format_time(seconds: f64) -> String {
    if seconds <= 0.0 {
        return "N/A".to_string();
    }
    let seconds = seconds as u64;
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
