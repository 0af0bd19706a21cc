// ABOUTME: Root library module exposing the admin panel and server
// ABOUTME: Re-exports the question model and stores from qa-core

#[cfg(feature = "admin")]
pub mod admin;
#[cfg(feature = "admin")]
pub mod server;

pub mod cli;

// Re-export platform-agnostic modules from qa-core
pub use qa_core::config;
pub use qa_core::paths;
pub use qa_core::question;
pub use qa_core::store;
pub use qa_core::utils;

pub use qa_core::{open_store, Filter, Question, QuestionStatus, QuestionStore};
