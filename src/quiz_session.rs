// src/quiz_session.rs

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio::time;

use crate::{
    api::QuizApi,
    error::AppError,
    models::{
        attempt::{AttemptResult, QuizSubmission},
        question::Question,
    },
};

/// Lifecycle of an in-progress attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Submitting,
    Completed,
    /// Submission was rejected for authentication reasons; the attempt
    /// cannot be recovered without signing in again.
    Failed,
}

/// Display status of one question index in the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStatus {
    Current,
    Answered,
    Unanswered,
}

/// Outcome of `advance`: either the session moved to another question or,
/// on the last question, it submitted.
#[derive(Debug)]
pub enum Progression {
    Moved(usize),
    Submitted(AttemptResult),
}

/// Abort-on-drop handle for the elapsed-seconds ticker task. Wrapping the
/// handle guarantees the task is cancelled exactly once, on whichever exit
/// path drops the guard first.
struct TickerGuard {
    handle: JoinHandle<()>,
}

impl Drop for TickerGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn spawn_ticker(elapsed: Arc<AtomicU64>) -> TickerGuard {
    let handle = tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_secs(1));
        // The first tick completes immediately; consume it so the counter
        // advances at one-second boundaries.
        interval.tick().await;
        loop {
            interval.tick().await;
            elapsed.fetch_add(1, Ordering::Relaxed);
        }
    });
    TickerGuard { handle }
}

/// One user working through one fixed question set.
///
/// Drives single-question navigation, answer accumulation, per-question
/// completeness validation, elapsed-time tracking and submission. All
/// mutation happens through `&mut self` in response to discrete caller
/// actions; the only autonomous activity is the one-second ticker task,
/// which the session owns and cancels on every exit path (submit,
/// abandonment via drop).
///
/// Must be created inside a Tokio runtime, since construction spawns the
/// ticker.
pub struct QuizSession {
    quiz_id: String,
    questions: Vec<Question>,
    current_index: usize,
    answers: HashMap<String, HashSet<String>>,
    started_at: DateTime<Utc>,
    elapsed: Arc<AtomicU64>,
    ticker: Option<TickerGuard>,
    state: SessionState,
    api: Arc<dyn QuizApi>,
}

impl std::fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizSession")
            .field("quiz_id", &self.quiz_id)
            .field("questions", &self.questions)
            .field("current_index", &self.current_index)
            .field("answers", &self.answers)
            .field("started_at", &self.started_at)
            .field("elapsed", &self.elapsed)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl QuizSession {
    /// Starts a session over an already-fetched question set.
    ///
    /// An empty set is fatal to the session: there is nothing to recover
    /// without new input.
    pub fn start(
        quiz_id: impl Into<String>,
        questions: Vec<Question>,
        api: Arc<dyn QuizApi>,
    ) -> Result<Self, AppError> {
        if questions.is_empty() {
            return Err(AppError::EmptyQuestionSet);
        }
        let elapsed = Arc::new(AtomicU64::new(0));
        let ticker = spawn_ticker(elapsed.clone());
        let quiz_id = quiz_id.into();
        tracing::debug!("Starting quiz session for quiz '{}'", quiz_id);
        Ok(Self {
            quiz_id,
            questions,
            current_index: 0,
            answers: HashMap::new(),
            started_at: Utc::now(),
            elapsed,
            ticker: Some(ticker),
            state: SessionState::Active,
            api,
        })
    }

    /// Fetches the quiz by id and starts a session over its questions.
    pub async fn load(
        quiz_id: &str,
        token: &str,
        api: Arc<dyn QuizApi>,
    ) -> Result<Self, AppError> {
        let detail = api.fetch_quiz(token, quiz_id).await?;
        Self::start(detail.quiz.id, detail.questions, api)
    }

    /// Toggles membership of `option` in the answer set of `question_id`.
    pub fn select_option(&mut self, question_id: &str, option: &str) -> Result<(), AppError> {
        self.ensure_active()?;
        if !self.questions.iter().any(|q| q.id == question_id) {
            return Err(AppError::InvalidQuestion(question_id.to_string()));
        }
        let selections = self.answers.entry(question_id.to_string()).or_default();
        if !selections.remove(option) {
            selections.insert(option.to_string());
        }
        Ok(())
    }

    /// Moves to the next question, or submits when already on the last
    /// one. The current question must have at least one selection.
    pub async fn advance(&mut self, token: &str) -> Result<Progression, AppError> {
        self.ensure_active()?;
        if !self.is_answered(self.current_index) {
            return Err(AppError::ValidationError(
                "Please select at least one answer before proceeding.".to_string(),
            ));
        }
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            Ok(Progression::Moved(self.current_index))
        } else {
            let result = self.submit(token).await?;
            Ok(Progression::Submitted(result))
        }
    }

    /// Moves back one question; no-op on the first.
    pub fn retreat(&mut self) -> Result<usize, AppError> {
        self.ensure_active()?;
        if self.current_index > 0 {
            self.current_index -= 1;
        }
        Ok(self.current_index)
    }

    /// Submits every answer along with the elapsed time.
    ///
    /// The clock freezes the moment submission starts. If the backend
    /// rejects the submission for a non-auth reason the session returns to
    /// `Active` and the clock resumes, so the time eventually charged
    /// reflects real elapsed time. An auth rejection marks the session
    /// `Failed`: resubmitting would fail regardless until the user signs
    /// in again.
    pub async fn submit(&mut self, token: &str) -> Result<AttemptResult, AppError> {
        match self.state {
            SessionState::Submitting | SessionState::Completed => {
                return Err(AppError::AlreadySubmitting);
            }
            SessionState::Failed => {
                return Err(AppError::AuthError(
                    "Session expired. Please sign in and retake the quiz.".to_string(),
                ));
            }
            SessionState::Active => {}
        }

        let missing = (0..self.questions.len())
            .filter(|&index| !self.is_answered(index))
            .count();
        if missing > 0 {
            return Err(AppError::Incomplete { missing });
        }

        // Freeze the clock; dropping the guard cancels the ticker task.
        self.ticker.take();
        self.state = SessionState::Submitting;

        let submission = QuizSubmission {
            answers: self
                .questions
                .iter()
                .map(|question| {
                    let mut selections: Vec<String> = self
                        .answers
                        .get(&question.id)
                        .map(|set| set.iter().cloned().collect())
                        .unwrap_or_default();
                    selections.sort();
                    (question.id.clone(), selections)
                })
                .collect(),
            start_time: self.started_at,
            time_taken_seconds: self.elapsed_seconds(),
        };

        tracing::debug!(
            "Submitting quiz '{}' after {}s",
            self.quiz_id,
            submission.time_taken_seconds
        );

        match self
            .api
            .submit_quiz(token, &self.quiz_id, &submission)
            .await
        {
            Ok(result) => {
                self.state = SessionState::Completed;
                tracing::info!(
                    "Quiz '{}' submitted: {}/{} correct",
                    self.quiz_id,
                    result.correct_answers,
                    result.total
                );
                Ok(result)
            }
            Err(AppError::AuthError(msg)) => {
                self.state = SessionState::Failed;
                Err(AppError::AuthError(msg))
            }
            Err(err) => {
                tracing::error!("Quiz submission failed: {}", err);
                self.state = SessionState::Active;
                self.ticker = Some(spawn_ticker(self.elapsed.clone()));
                Err(err)
            }
        }
    }

    /// Ternary per-index status for the progress indicator.
    pub fn progress(&self) -> Vec<QuestionStatus> {
        (0..self.questions.len())
            .map(|index| {
                if index == self.current_index {
                    QuestionStatus::Current
                } else if self.is_answered(index) {
                    QuestionStatus::Answered
                } else {
                    QuestionStatus::Unanswered
                }
            })
            .collect()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self, question_id: &str) -> Option<&HashSet<String>> {
        self.answers.get(question_id)
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Seconds accrued while the session has been active. Monotonic;
    /// frozen once submission starts.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.load(Ordering::Relaxed)
    }

    fn is_answered(&self, index: usize) -> bool {
        self.questions
            .get(index)
            .and_then(|question| self.answers.get(&question.id))
            .is_some_and(|selections| !selections.is_empty())
    }

    fn ensure_active(&self) -> Result<(), AppError> {
        match self.state {
            SessionState::Active => Ok(()),
            SessionState::Submitting => Err(AppError::AlreadySubmitting),
            SessionState::Completed => Err(AppError::ValidationError(
                "This quiz has already been submitted.".to_string(),
            )),
            SessionState::Failed => Err(AppError::AuthError(
                "Session expired. Please sign in and retake the quiz.".to_string(),
            )),
        }
    }
}
