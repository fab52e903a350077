// src/api.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::{
    config::Config,
    error::AppError,
    models::{
        attempt::{AttemptDetail, AttemptResult, AttemptSummary, QuizSubmission},
        quiz::QuizDetail,
        user::{ProfileUpdate, Session, User},
    },
};

/// The remote quiz backend, as seen by the client core.
///
/// Everything behind this trait is an external collaborator: the trait
/// captures request/response shapes only, so the session store and the
/// quiz session can be exercised against in-memory doubles.
#[async_trait]
pub trait QuizApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<Session, AppError>;

    async fn signup(&self, username: &str, email: &str, password: &str) -> Result<(), AppError>;

    async fn fetch_quiz(&self, token: &str, quiz_id: &str) -> Result<QuizDetail, AppError>;

    async fn submit_quiz(
        &self,
        token: &str,
        quiz_id: &str,
        submission: &QuizSubmission,
    ) -> Result<AttemptResult, AppError>;

    async fn fetch_history(
        &self,
        token: &str,
        username: &str,
    ) -> Result<Vec<AttemptSummary>, AppError>;

    async fn fetch_attempt(&self, token: &str, attempt_id: &str)
    -> Result<AttemptDetail, AppError>;

    async fn delete_attempt(&self, token: &str, attempt_id: &str) -> Result<(), AppError>;

    async fn update_profile(
        &self,
        token: &str,
        username: &str,
        update: &ProfileUpdate,
    ) -> Result<User, AppError>;
}

/// Error body used by the backend for every non-2xx response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// `QuizApi` implementation over HTTP (reqwest).
pub struct HttpQuizApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpQuizApi {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        let base_url = Url::parse(&config.api_base_url)?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        Ok(self.base_url.join(path)?)
    }

    fn authorized(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.bearer_auth(token)
    }

    /// Maps a non-2xx response to an `AppError`, preferring the
    /// server-provided `detail` message over the fallback.
    async fn reject(response: Response, fallback: &str) -> AppError {
        let status = response.status();
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| fallback.to_string());
        tracing::error!("API request failed ({}): {}", status, detail);
        if status == StatusCode::UNAUTHORIZED {
            AppError::AuthError(detail)
        } else {
            AppError::Api(detail)
        }
    }
}

#[async_trait]
impl QuizApi for HttpQuizApi {
    async fn login(&self, username: &str, password: &str) -> Result<Session, AppError> {
        let response = self
            .client
            .post(self.endpoint("token")?)
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::reject(response, "Login failed").await);
        }

        let session: Session = response
            .json::<crate::models::user::LoginResponse>()
            .await?
            .into();
        tracing::debug!("Logged in as '{}'", session.user.username);
        Ok(session)
    }

    async fn signup(&self, username: &str, email: &str, password: &str) -> Result<(), AppError> {
        let response = self
            .client
            .post(self.endpoint("signup")?)
            .json(&json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::reject(response, "Sign up failed").await);
        }
        Ok(())
    }

    async fn fetch_quiz(&self, token: &str, quiz_id: &str) -> Result<QuizDetail, AppError> {
        let request = self
            .client
            .get(self.endpoint(&format!("quiz/{}", quiz_id))?);
        let response = self.authorized(request, token).send().await?;

        if !response.status().is_success() {
            return Err(Self::reject(response, "Failed to fetch quiz").await);
        }
        Ok(response.json().await?)
    }

    async fn submit_quiz(
        &self,
        token: &str,
        quiz_id: &str,
        submission: &QuizSubmission,
    ) -> Result<AttemptResult, AppError> {
        let request = self
            .client
            .post(self.endpoint(&format!("quiz/{}/submit", quiz_id))?)
            .json(submission);
        let response = self.authorized(request, token).send().await?;

        if !response.status().is_success() {
            return Err(Self::reject(response, "Failed to submit quiz").await);
        }
        Ok(response.json().await?)
    }

    async fn fetch_history(
        &self,
        token: &str,
        username: &str,
    ) -> Result<Vec<AttemptSummary>, AppError> {
        let request = self
            .client
            .get(self.endpoint(&format!("users/{}/history", username))?);
        let response = self.authorized(request, token).send().await?;

        if !response.status().is_success() {
            return Err(Self::reject(response, "Failed to fetch quiz history").await);
        }
        Ok(response.json().await?)
    }

    async fn fetch_attempt(
        &self,
        token: &str,
        attempt_id: &str,
    ) -> Result<AttemptDetail, AppError> {
        let request = self
            .client
            .get(self.endpoint(&format!("quiz-attempt/{}", attempt_id))?);
        let response = self.authorized(request, token).send().await?;

        if !response.status().is_success() {
            return Err(Self::reject(response, "Failed to fetch quiz attempt").await);
        }
        Ok(response.json().await?)
    }

    async fn delete_attempt(&self, token: &str, attempt_id: &str) -> Result<(), AppError> {
        let request = self
            .client
            .delete(self.endpoint(&format!("quiz-attempt/{}", attempt_id))?);
        let response = self.authorized(request, token).send().await?;

        if !response.status().is_success() {
            return Err(Self::reject(response, "Failed to delete quiz attempt").await);
        }
        Ok(())
    }

    async fn update_profile(
        &self,
        token: &str,
        username: &str,
        update: &ProfileUpdate,
    ) -> Result<User, AppError> {
        let request = self
            .client
            .put(self.endpoint(&format!("users/{}", username))?)
            .json(update);
        let response = self.authorized(request, token).send().await?;

        if !response.status().is_success() {
            return Err(Self::reject(response, "Failed to update profile").await);
        }
        Ok(response.json().await?)
    }
}
