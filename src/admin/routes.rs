// ABOUTME: Admin panel route handlers
// ABOUTME: Lists questions by filter, opens the answer dialog, saves answers and deletes

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use qa_core::config::DisplayConfig;
use qa_core::question::normalize_answer;
use qa_core::{Filter, SharedQuestionStore};
use serde::Deserialize;

use crate::admin::templates::{
    AnswerModalTemplate, QuestionListTemplate, QuestionsPageTemplate, ToastTemplate,
};
use crate::admin::view::ListView;

/// Shown when the store reports the question could not be changed
pub const GENERIC_ERROR: &str = "Something went wrong, please try again.";
pub const EMPTY_ANSWER: &str = "Please type an answer.";

/// Event name the page listens for to close the answer dialog
pub const MODAL_CLOSE_EVENT: &str = "qa-modal-close";

#[derive(Clone)]
pub struct AdminState {
    pub store: SharedQuestionStore,
    pub display: DisplayConfig,
}

#[derive(Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub filter: Filter,
}

#[derive(Deserialize)]
pub struct AnswerForm {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub filter: Filter,
}

#[derive(Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub filter: Filter,
}

/// Build the admin router mounted at /admin
pub fn admin_router() -> Router<AdminState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/admin/questions") }))
        .route("/questions", get(questions_page))
        .route("/questions/{id}", get(answer_modal))
        .route("/questions/{id}/answer", post(answer_save))
        .route("/questions/{id}/delete", post(question_delete))
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true")
}

/// Toast swapped into the #toast region instead of the request's own target
fn error_toast(message: &str) -> Response {
    (
        [("HX-Retarget", "#toast"), ("HX-Reswap", "innerHTML")],
        ToastTemplate {
            message: message.to_string(),
        },
    )
        .into_response()
}

async fn load_view(state: &AdminState, filter: Filter) -> ListView {
    let questions = match state.store.list().await {
        Ok(q) => q,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list questions");
            Vec::new()
        }
    };
    ListView::build(questions, filter, &state.display)
}

/// Full page, or only the list region for htmx requests
enum ListResponse {
    Page(QuestionsPageTemplate),
    Partial(QuestionListTemplate),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            ListResponse::Page(t) => t.into_response(),
            ListResponse::Partial(t) => t.into_response(),
        }
    }
}

async fn questions_page(
    State(state): State<AdminState>,
    Query(query): Query<FilterQuery>,
    headers: HeaderMap,
) -> ListResponse {
    let view = load_view(&state, query.filter).await;

    if is_htmx(&headers) {
        ListResponse::Partial(QuestionListTemplate { view })
    } else {
        ListResponse::Page(QuestionsPageTemplate {
            title: "Questions - Q&A Admin".to_string(),
            view,
        })
    }
}

async fn answer_modal(
    State(state): State<AdminState>,
    AxumPath(id): AxumPath<i64>,
    Query(query): Query<FilterQuery>,
) -> Result<AnswerModalTemplate, StatusCode> {
    match state.store.get(id).await {
        Ok(Some(question)) => Ok(AnswerModalTemplate::new(
            &question,
            query.filter,
            &state.display,
        )),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!(id, error = %e, "Failed to load question");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Refreshed list for the operator's filter, closing the dialog client-side
async fn refreshed_list(state: &AdminState, filter: Filter) -> Response {
    let view = load_view(state, filter).await;
    (
        [("HX-Trigger", MODAL_CLOSE_EVENT)],
        QuestionListTemplate { view },
    )
        .into_response()
}

async fn answer_save(
    State(state): State<AdminState>,
    AxumPath(id): AxumPath<i64>,
    Form(form): Form<AnswerForm>,
) -> Response {
    let Some(answer) = normalize_answer(&form.answer) else {
        return error_toast(EMPTY_ANSWER);
    };

    match state.store.update(id, answer).await {
        Ok(true) => refreshed_list(&state, form.filter).await,
        Ok(false) => {
            tracing::warn!(id, "Answer not saved: question not found");
            error_toast(GENERIC_ERROR)
        }
        Err(e) => {
            tracing::error!(id, error = %e, "Failed to save answer");
            error_toast(GENERIC_ERROR)
        }
    }
}

async fn question_delete(
    State(state): State<AdminState>,
    AxumPath(id): AxumPath<i64>,
    Form(form): Form<DeleteForm>,
) -> Response {
    match state.store.delete(id).await {
        Ok(true) => refreshed_list(&state, form.filter).await,
        Ok(false) => {
            tracing::warn!(id, "Delete failed: question not found");
            error_toast(GENERIC_ERROR)
        }
        Err(e) => {
            tracing::error!(id, error = %e, "Failed to delete question");
            error_toast(GENERIC_ERROR)
        }
    }
}
