// ABOUTME: Question record submitted by users and answered by an operator
// ABOUTME: Owns the status invariant and the filter used by list views

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Answer state of a question
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    #[default]
    Pending,
    Answered,
}

impl std::fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Answered => write!(f, "answered"),
        }
    }
}

impl std::str::FromStr for QuestionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "answered" => Ok(Self::Answered),
            _ => anyhow::bail!("Unknown question status: {}", s),
        }
    }
}

/// A user-submitted question. Serialized with the same camelCase keys the
/// remote API and the local storage slot use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub category: String,
    /// Name of the submitter
    pub name: String,
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub status: QuestionStatus,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub answered_date: Option<DateTime<Utc>>,
}

impl Question {
    /// Create a pending question with no answer
    pub fn pending(
        id: i64,
        category: impl Into<String>,
        name: impl Into<String>,
        question: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            category: category.into(),
            name: name.into(),
            question: question.into(),
            answer: String::new(),
            status: QuestionStatus::Pending,
            date,
            answered_date: None,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.status == QuestionStatus::Answered
    }

    /// Record an operator answer. This is the only mutation path, so status,
    /// answer and answered_date always move together.
    pub fn record_answer(&mut self, answer: &str, now: DateTime<Utc>) {
        self.answer = answer.to_string();
        self.status = QuestionStatus::Answered;
        self.answered_date = Some(now);
    }
}

/// Trim operator input. Returns None for blank answers, which no backend accepts.
pub fn normalize_answer(answer: &str) -> Option<&str> {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Status filter for list views
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Pending,
    Answered,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Pending, Filter::Answered];

    pub fn matches(&self, question: &Question) -> bool {
        match self {
            Self::All => true,
            Self::Pending => question.status == QuestionStatus::Pending,
            Self::Answered => question.status == QuestionStatus::Answered,
        }
    }

    /// Keep only matching questions, preserving backend order
    pub fn apply(&self, questions: Vec<Question>) -> Vec<Question> {
        questions.into_iter().filter(|q| self.matches(q)).collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Answered => "answered",
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Filter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "answered" => Ok(Self::Answered),
            _ => anyhow::bail!("Unknown filter: {} (expected all, pending or answered)", s),
        }
    }
}
