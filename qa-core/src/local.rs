// ABOUTME: Local persistent storage for questions as a single key-value slot in SQLite
// ABOUTME: The slot holds the whole JSON array and is rewritten in full on every mutation
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::question::{normalize_answer, Question};
use crate::store::QuestionStore;

/// Name of the slot holding the serialized question list
pub const QUESTIONS_SLOT: &str = "qa_questions";

#[derive(Clone)]
pub struct LocalStore {
    db: Arc<Mutex<Connection>>,
}

impl LocalStore {
    /// Open (or create) the storage file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create storage directory: {}", parent.display())
                })?;
            }
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open local storage: {}", path.display()))?;
        let store = Self::with_connection(conn)?;

        tracing::info!(path = %path.display(), "LocalStore initialized");
        Ok(store)
    }

    /// Storage that lives only as long as the process
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory storage")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.db
            .lock()
            .map_err(|e| anyhow::anyhow!("Local storage mutex poisoned: {}", e))
    }

    fn read_slot(conn: &Connection) -> Result<Vec<Question>> {
        let mut stmt = conn.prepare("SELECT value FROM local_storage WHERE key = ?1")?;
        let value = stmt.query_row(params![QUESTIONS_SLOT], |row| row.get::<_, String>(0));

        match value {
            Ok(json) => serde_json::from_str(&json)
                .with_context(|| format!("Malformed JSON in local slot '{}'", QUESTIONS_SLOT)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_slot(conn: &Connection, questions: &[Question]) -> Result<()> {
        let json = serde_json::to_string(questions)?;
        conn.execute(
            "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![QUESTIONS_SLOT, json],
        )?;
        Ok(())
    }

    /// Read the full question list. A missing slot is an empty list.
    pub fn load(&self) -> Result<Vec<Question>> {
        let db = self.lock()?;
        Self::read_slot(&db)
    }

    /// Replace the full question list
    pub fn save(&self, questions: &[Question]) -> Result<()> {
        let db = self.lock()?;
        Self::write_slot(&db, questions)?;
        tracing::debug!(count = questions.len(), "Local slot written");
        Ok(())
    }

    /// Append a new pending question, assigning the next free id
    pub fn submit(&self, category: &str, name: &str, question: &str) -> Result<Question> {
        let db = self.lock()?;
        let mut questions = Self::read_slot(&db)?;

        let id = questions.iter().map(|q| q.id).max().unwrap_or(0) + 1;
        let record = Question::pending(id, category, name, question, Utc::now());
        questions.push(record.clone());
        Self::write_slot(&db, &questions)?;

        tracing::info!(id, category = %category, "Question submitted to local storage");
        Ok(record)
    }

    /// Answer the question with `id` in place. Returns false when it is absent.
    pub fn apply_answer(&self, id: i64, answer: &str, now: DateTime<Utc>) -> Result<bool> {
        let db = self.lock()?;
        let mut questions = Self::read_slot(&db)?;

        let Some(question) = questions.iter_mut().find(|q| q.id == id) else {
            return Ok(false);
        };
        question.record_answer(answer, now);
        Self::write_slot(&db, &questions)?;

        tracing::info!(id, "Answer saved to local storage");
        Ok(true)
    }

    /// Remove the question with `id`. Returns false when it is absent.
    pub fn remove(&self, id: i64) -> Result<bool> {
        let db = self.lock()?;
        let mut questions = Self::read_slot(&db)?;

        let Some(index) = questions.iter().position(|q| q.id == id) else {
            return Ok(false);
        };
        questions.remove(index);
        Self::write_slot(&db, &questions)?;

        tracing::info!(id, "Question deleted from local storage");
        Ok(true)
    }
}

#[async_trait]
impl QuestionStore for LocalStore {
    async fn list(&self) -> Result<Vec<Question>> {
        self.load()
    }

    async fn update(&self, id: i64, answer: &str) -> Result<bool> {
        let Some(answer) = normalize_answer(answer) else {
            return Ok(false);
        };
        self.apply_answer(id, answer, Utc::now())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.remove(id)
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}
