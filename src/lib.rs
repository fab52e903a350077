// src/lib.rs

pub mod answers;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod quiz_session;
pub mod review;
pub mod session;
pub mod storage;

// Re-export specific items for convenience if needed
pub use error::AppError;
pub use quiz_session::QuizSession;
pub use session::SessionStore;
