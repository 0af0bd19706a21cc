// ABOUTME: Backend-agnostic CRUD surface over the question collection
// ABOUTME: The backend is chosen once from config when the store is opened

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Config;
use crate::local::LocalStore;
use crate::question::Question;
use crate::remote::{RemoteClient, RemoteStore};

/// Persistence facade shared by the admin panel and the CLI.
///
/// `Err` is reserved for local storage failures. Remote failures never
/// surface here; see [`RemoteStore`].
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// All questions in backend order
    async fn list(&self) -> Result<Vec<Question>>;

    /// Answer a question. Blank answers are rejected with `false`.
    async fn update(&self, id: i64, answer: &str) -> Result<bool>;

    async fn delete(&self, id: i64) -> Result<bool>;

    /// Backend identifier for logs ("local" or "remote")
    fn backend_name(&self) -> &'static str;

    async fn get(&self, id: i64) -> Result<Option<Question>> {
        Ok(self.list().await?.into_iter().find(|q| q.id == id))
    }
}

pub type SharedQuestionStore = Arc<dyn QuestionStore>;

/// Build the store described by `config`. Local storage is always opened,
/// either as the only backend or as the remote fallback.
pub fn open_store(config: &Config) -> Result<SharedQuestionStore> {
    let local = LocalStore::open(&config.storage.path)?;

    if config.remote_enabled() {
        tracing::info!(api_url = %config.remote.api_url, "Using remote question API");
        let client = RemoteClient::new(&config.remote.api_url);
        Ok(Arc::new(RemoteStore::new(client, local)))
    } else {
        tracing::info!(path = %config.storage.path, "No API URL configured, using local storage");
        Ok(Arc::new(local))
    }
}
