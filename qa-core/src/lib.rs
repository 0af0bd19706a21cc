// ABOUTME: Question model and dual-backend persistence for the Q&A admin
// ABOUTME: Provides the QuestionStore trait with local and remote implementations

pub mod config;
pub mod error;
pub mod local;
pub mod paths;
pub mod question;
pub mod remote;
pub mod store;
pub mod utils;

pub use error::RemoteError;
pub use local::LocalStore;
pub use question::{Filter, Question, QuestionStatus};
pub use remote::{RemoteClient, RemoteStore};
pub use store::{open_store, QuestionStore, SharedQuestionStore};
