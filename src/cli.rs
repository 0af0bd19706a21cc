// ABOUTME: Command-line interface for the Q&A admin
// ABOUTME: Serves the admin panel or runs list/show/answer/delete/import against the store

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use qa_core::config::Config;
use qa_core::utils::format_date;
use qa_core::{Filter, LocalStore, Question, SharedQuestionStore};
use std::collections::HashSet;
use std::path::PathBuf;

/// Answer and moderate user-submitted questions
#[derive(Parser, Debug)]
#[command(name = "qa-admin", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the web admin panel (default)
    Serve,
    /// List questions
    List {
        /// all, pending or answered
        #[arg(short, long, default_value = "all")]
        filter: Filter,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one question with its answer
    Show { id: i64 },
    /// Answer a question
    Answer { id: i64, text: String },
    /// Delete a question
    Delete { id: i64 },
    /// Replace local storage with questions from a JSON array file
    Import { path: PathBuf },
}

pub async fn run(cli: Cli, config: Config, store: SharedQuestionStore) -> Result<()> {
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&config, store).await,
        Commands::List { filter, json } => {
            let questions = filter.apply(store.list().await?);
            if json {
                println!("{}", serde_json::to_string_pretty(&questions)?);
            } else if questions.is_empty() {
                println!("No questions to show.");
            } else {
                for q in &questions {
                    println!("{}", summary_line(q, &config));
                }
            }
            Ok(())
        }
        Commands::Show { id } => {
            let question = store
                .get(id)
                .await?
                .with_context(|| format!("Question {} not found", id))?;
            println!("{}", summary_line(&question, &config));
            println!("From: {}", question.name);
            println!();
            println!("{}", question.question);
            if let Some(answered) = question.answered_date {
                println!();
                println!(
                    "Answer ({}):",
                    format_date(answered, config.display.tz(), config.display.buddhist_era)
                );
                println!("{}", question.answer);
            }
            Ok(())
        }
        Commands::Answer { id, text } => {
            if !store.update(id, &text).await? {
                anyhow::bail!("Something went wrong, please try again.");
            }
            println!("Answered question {}", id);
            Ok(())
        }
        Commands::Delete { id } => {
            if !store.delete(id).await? {
                anyhow::bail!("Something went wrong, please try again.");
            }
            println!("Deleted question {}", id);
            Ok(())
        }
        Commands::Import { path } => {
            let count = import_file(&config, &path)?;
            println!("Imported {} questions into {}", count, config.storage.path);
            Ok(())
        }
    }
}

#[cfg(feature = "admin")]
async fn serve(config: &Config, store: SharedQuestionStore) -> Result<()> {
    crate::server::serve(config, store).await
}

#[cfg(not(feature = "admin"))]
async fn serve(_config: &Config, _store: SharedQuestionStore) -> Result<()> {
    anyhow::bail!("Admin panel not compiled. Build with --features admin")
}

fn summary_line(q: &Question, config: &Config) -> String {
    format!(
        "#{} [{}] {} {}: {}",
        q.id,
        q.status,
        format_date(q.date, config.display.tz(), config.display.buddhist_era),
        q.category,
        q.question
    )
}

/// Load a JSON array of questions and write it to the local slot
pub fn import_file(config: &Config, path: &std::path::Path) -> Result<usize> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let questions: Vec<Question> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    validate_import(&questions)?;

    let local = LocalStore::open(&config.storage.path)?;
    local.save(&questions)?;
    tracing::info!(count = questions.len(), path = %path.display(), "Questions imported");
    Ok(questions.len())
}

/// Ids must be unique, and answered records must carry an answer and a date
pub fn validate_import(questions: &[Question]) -> Result<()> {
    let mut seen = HashSet::new();
    for q in questions {
        if !seen.insert(q.id) {
            anyhow::bail!("Duplicate question id {}", q.id);
        }
        let has_answer = !q.answer.is_empty() && q.answered_date.is_some();
        if q.is_answered() != has_answer {
            anyhow::bail!(
                "Question {} has status '{}' but its answer fields disagree",
                q.id,
                q.status
            );
        }
    }
    Ok(())
}
