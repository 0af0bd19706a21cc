// ABOUTME: HTTP client for the remote question API and the store that wraps it
// ABOUTME: Remote failures degrade to the local slot and still report success

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::RemoteError;
use crate::local::LocalStore;
use crate::question::{normalize_answer, Question};
use crate::store::QuestionStore;

/// Response envelope shared by every endpoint
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
}

#[derive(Debug, Serialize)]
struct AnswerBody<'a> {
    answer: &'a str,
}

#[derive(Clone)]
pub struct RemoteClient {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn question_url(&self, id: i64) -> String {
        format!("{}/api/questions/{}", self.base_url, id)
    }

    /// Decode the envelope and check the success flag
    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Option<T>, RemoteError> {
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let envelope: ApiResponse<T> = serde_json::from_str(&body)?;
        if !envelope.success {
            return Err(RemoteError::Unsuccessful);
        }
        Ok(envelope.data)
    }

    pub async fn list_questions(&self) -> Result<Vec<Question>, RemoteError> {
        let url = format!("{}/api/questions", self.base_url);
        let response = self.client.get(&url).send().await?;
        let data = Self::read_envelope::<Vec<Question>>(response).await?;
        Ok(data.unwrap_or_default())
    }

    pub async fn update_answer(&self, id: i64, answer: &str) -> Result<(), RemoteError> {
        let response = self
            .client
            .put(self.question_url(id))
            .json(&AnswerBody { answer })
            .send()
            .await?;
        Self::read_envelope::<serde_json::Value>(response).await?;
        Ok(())
    }

    pub async fn delete_question(&self, id: i64) -> Result<(), RemoteError> {
        let response = self.client.delete(self.question_url(id)).send().await?;
        Self::read_envelope::<serde_json::Value>(response).await?;
        Ok(())
    }
}

/// Store that prefers the remote API and falls back to local storage.
///
/// Update and delete report success whenever the remote call fails, whether or
/// not the record existed locally. Callers cannot tell a remote success from a
/// local fallback. Failures are only visible in the logs.
#[derive(Clone)]
pub struct RemoteStore {
    client: RemoteClient,
    fallback: LocalStore,
}

impl RemoteStore {
    pub fn new(client: RemoteClient, fallback: LocalStore) -> Self {
        Self { client, fallback }
    }

    pub fn fallback(&self) -> &LocalStore {
        &self.fallback
    }
}

#[async_trait]
impl QuestionStore for RemoteStore {
    async fn list(&self) -> Result<Vec<Question>> {
        match self.client.list_questions().await {
            Ok(questions) => Ok(questions),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    base_url = %self.client.base_url(),
                    "Remote list failed, serving local snapshot"
                );
                self.fallback.load()
            }
        }
    }

    async fn update(&self, id: i64, answer: &str) -> Result<bool> {
        let Some(answer) = normalize_answer(answer) else {
            return Ok(false);
        };

        match self.client.update_answer(id, answer).await {
            Ok(()) => {
                tracing::info!(id, "Answer saved remotely");
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "Remote update failed, applying to local storage");
                let found = self.fallback.apply_answer(id, answer, Utc::now())?;
                if !found {
                    tracing::debug!(id, "Question not in local snapshot, nothing to update");
                }
                Ok(true)
            }
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        match self.client.delete_question(id).await {
            Ok(()) => {
                tracing::info!(id, "Question deleted remotely");
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "Remote delete failed, applying to local storage");
                let found = self.fallback.remove(id)?;
                if !found {
                    tracing::debug!(id, "Question not in local snapshot, nothing to delete");
                }
                Ok(true)
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "remote"
    }
}
