// tests/session_store_tests.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use quizium_client::api::QuizApi;
use quizium_client::error::AppError;
use quizium_client::models::attempt::{AttemptDetail, AttemptResult, AttemptSummary, QuizSubmission};
use quizium_client::models::quiz::QuizDetail;
use quizium_client::models::user::{Preferences, ProfileUpdate, Session, User};
use quizium_client::session::SessionStore;
use quizium_client::storage::{MemoryStorage, SessionStorage};

/// In-memory stand-in for the backend's auth endpoints.
#[derive(Default)]
struct FakeApi {
    reject_logins: bool,
    signup_calls: AtomicUsize,
}

fn sample_user(username: &str) -> User {
    User {
        id: "65f0a1b2c3d4e5f6a7b8c9d0".to_string(),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        created_at: "2024-01-15T10:30:00".to_string(),
        preferences: Preferences::default(),
    }
}

#[async_trait]
impl QuizApi for FakeApi {
    async fn login(&self, username: &str, _password: &str) -> Result<Session, AppError> {
        if self.reject_logins {
            return Err(AppError::AuthError("Incorrect username or password".to_string()));
        }
        Ok(Session {
            token: format!("token-for-{}", username),
            user: sample_user(username),
        })
    }

    async fn signup(&self, _username: &str, _email: &str, _password: &str) -> Result<(), AppError> {
        self.signup_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn fetch_quiz(&self, _token: &str, _quiz_id: &str) -> Result<QuizDetail, AppError> {
        unimplemented!()
    }

    async fn submit_quiz(
        &self,
        _token: &str,
        _quiz_id: &str,
        _submission: &QuizSubmission,
    ) -> Result<AttemptResult, AppError> {
        unimplemented!()
    }

    async fn fetch_history(
        &self,
        _token: &str,
        _username: &str,
    ) -> Result<Vec<AttemptSummary>, AppError> {
        unimplemented!()
    }

    async fn fetch_attempt(
        &self,
        _token: &str,
        _attempt_id: &str,
    ) -> Result<AttemptDetail, AppError> {
        unimplemented!()
    }

    async fn delete_attempt(&self, _token: &str, _attempt_id: &str) -> Result<(), AppError> {
        unimplemented!()
    }

    async fn update_profile(
        &self,
        _token: &str,
        _username: &str,
        _update: &ProfileUpdate,
    ) -> Result<User, AppError> {
        unimplemented!()
    }
}

fn store_with(api: FakeApi, storage: Arc<MemoryStorage>) -> SessionStore {
    SessionStore::new(Arc::new(api), storage)
}

#[tokio::test]
async fn login_survives_a_process_restart() {
    // Arrange
    let storage = Arc::new(MemoryStorage::new());
    let mut store = store_with(FakeApi::default(), storage.clone());

    // Act: log in, tear the store down, hydrate a fresh one from the same
    // persisted storage.
    let session = store.login("alice", "s3cret-pass").await.expect("login failed");
    drop(store);

    let mut restarted = store_with(FakeApi::default(), storage);
    restarted.hydrate();

    // Assert: the identical token and user come back.
    assert_eq!(restarted.session(), Some(&session));
    assert_eq!(restarted.token(), Some("token-for-alice"));
    assert_eq!(restarted.user().map(|u| u.username.as_str()), Some("alice"));
}

#[tokio::test]
async fn hydrate_without_persisted_data_yields_empty_session() {
    let mut store = store_with(FakeApi::default(), Arc::new(MemoryStorage::new()));

    store.hydrate();

    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn corrupt_persisted_user_is_treated_as_logout() {
    // Arrange: a token next to user JSON that does not parse
    let storage = Arc::new(MemoryStorage::new());
    storage.set("token", "stale-token");
    storage.set("user", "{ not valid json");

    let mut store = store_with(FakeApi::default(), storage.clone());

    // Act
    store.hydrate();

    // Assert: empty session, and both keys cleared
    assert!(!store.is_authenticated());
    assert_eq!(storage.get("token"), None);
    assert_eq!(storage.get("user"), None);
}

#[tokio::test]
async fn logout_clears_everything_and_is_idempotent() {
    let storage = Arc::new(MemoryStorage::new());
    let mut store = store_with(FakeApi::default(), storage.clone());
    store.login("bob", "hunter2-hunter2").await.expect("login failed");

    store.logout();
    store.logout();

    assert!(!store.is_authenticated());
    assert_eq!(storage.get("token"), None);
    assert_eq!(storage.get("user"), None);
}

#[tokio::test]
async fn signup_immediately_authenticates() {
    let storage = Arc::new(MemoryStorage::new());
    let api = FakeApi::default();
    let mut store = SessionStore::new(Arc::new(api), storage.clone());

    let session = store
        .signup("carol", "carol@example.com", "longenough1")
        .await
        .expect("signup failed");

    assert!(store.is_authenticated());
    assert_eq!(session.token, "token-for-carol");
    assert_eq!(storage.get("token").as_deref(), Some("token-for-carol"));
}

#[tokio::test]
async fn signup_rejects_invalid_email_before_any_network_call() {
    let storage = Arc::new(MemoryStorage::new());
    let mut store = store_with(FakeApi::default(), storage);

    let err = store
        .signup("carol", "not-an-email", "longenough1")
        .await
        .expect_err("signup should fail validation");

    assert!(matches!(err, AppError::ValidationError(_)));
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn signup_rejects_short_password() {
    let mut store = store_with(FakeApi::default(), Arc::new(MemoryStorage::new()));

    let err = store
        .signup("carol", "carol@example.com", "short")
        .await
        .expect_err("signup should fail validation");

    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn failed_login_leaves_no_stale_session() {
    // Arrange: a successful login followed by a rejected one
    let storage = Arc::new(MemoryStorage::new());
    let mut store = store_with(FakeApi::default(), storage.clone());
    store.login("dave", "correct-password").await.expect("login failed");

    let mut rejecting = store_with(
        FakeApi {
            reject_logins: true,
            ..FakeApi::default()
        },
        storage.clone(),
    );
    rejecting.hydrate();
    assert!(rejecting.is_authenticated());

    // Act
    let err = rejecting
        .login("mallory", "wrong-password")
        .await
        .expect_err("login should be rejected");

    // Assert: the old session was cleared before the new login was
    // attempted, so nothing stale survives the failure.
    assert!(matches!(err, AppError::AuthError(_)));
    assert!(!rejecting.is_authenticated());
    assert_eq!(storage.get("token"), None);
    assert_eq!(storage.get("user"), None);
}

#[tokio::test]
async fn update_user_replaces_profile_but_not_token() {
    let storage = Arc::new(MemoryStorage::new());
    let mut store = store_with(FakeApi::default(), storage.clone());
    store.login("erin", "a-fine-password").await.expect("login failed");

    let mut updated = sample_user("erin");
    updated.email = "erin@new-domain.example.com".to_string();
    store.update_user(updated.clone()).expect("update failed");

    assert_eq!(store.user(), Some(&updated));
    assert_eq!(store.token(), Some("token-for-erin"));

    // The new profile is already persisted.
    let mut restarted = store_with(FakeApi::default(), storage);
    restarted.hydrate();
    assert_eq!(restarted.user(), Some(&updated));
}

#[tokio::test]
async fn update_user_requires_authentication() {
    let mut store = store_with(FakeApi::default(), Arc::new(MemoryStorage::new()));

    let err = store
        .update_user(sample_user("nobody"))
        .expect_err("update should fail");

    assert!(matches!(err, AppError::AuthError(_)));
}
