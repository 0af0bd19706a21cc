// ABOUTME: Askama template structs for the question admin panel
// ABOUTME: Templates are compiled into binary at build time

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use qa_core::config::DisplayConfig;
use qa_core::utils::format_date;
use qa_core::{Filter, Question};

use crate::admin::view::ListView;

/// Render templates straight from handlers; a render failure becomes a 500
macro_rules! impl_into_response {
    ($($template:ty),* $(,)?) => {
        $(
            impl IntoResponse for $template {
                fn into_response(self) -> Response {
                    match self.render() {
                        Ok(html) => Html(html).into_response(),
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to render template");
                            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
                        }
                    }
                }
            }
        )*
    };
}

#[derive(Template)]
#[template(path = "admin/questions.html")]
pub struct QuestionsPageTemplate {
    pub title: String,
    pub view: ListView,
}

/// The swappable region of the page: list container plus empty-state message
#[derive(Template)]
#[template(path = "partials/question_list.html")]
pub struct QuestionListTemplate {
    pub view: ListView,
}

#[derive(Template)]
#[template(path = "partials/answer_modal.html")]
pub struct AnswerModalTemplate {
    pub id: i64,
    pub category: String,
    pub date: String,
    pub author: String,
    pub question: String,
    pub answer: String,
    /// Delete is only offered once a question has been answered
    pub show_delete: bool,
    /// Filter to re-render the list with after saving
    pub filter: String,
}

impl AnswerModalTemplate {
    pub fn new(question: &Question, filter: Filter, display: &DisplayConfig) -> Self {
        Self {
            id: question.id,
            category: question.category.clone(),
            date: format_date(question.date, display.tz(), display.buddhist_era),
            author: question.name.clone(),
            question: question.question.clone(),
            answer: question.answer.clone(),
            show_delete: question.is_answered(),
            filter: filter.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "partials/toast.html")]
pub struct ToastTemplate {
    pub message: String,
}

impl_into_response!(
    QuestionsPageTemplate,
    QuestionListTemplate,
    AnswerModalTemplate,
    ToastTemplate,
);
