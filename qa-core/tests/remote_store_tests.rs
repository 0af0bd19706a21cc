// ABOUTME: Tests for the remote question store against a mock HTTP API
// ABOUTME: Covers the response envelope, error taxonomy, and local fallback contract

use mockito::Matcher;
use qa_core::{LocalStore, QuestionStatus, QuestionStore, RemoteClient, RemoteError, RemoteStore};
use serde_json::json;

/// Nothing listens on port 1, so every request fails at the transport level
const UNREACHABLE: &str = "http://127.0.0.1:1";

fn local_with_questions() -> LocalStore {
    let local = LocalStore::in_memory().unwrap();
    local.submit("General", "Nok", "Local question one").unwrap();
    local.submit("General", "Dao", "Local question two").unwrap();
    local
}

fn remote_questions_body() -> String {
    json!({
        "success": true,
        "data": [
            {
                "id": 20,
                "category": "Admissions",
                "name": "Remote B",
                "question": "Second by id, first in order",
                "answer": "",
                "status": "pending",
                "date": "2024-05-02T10:00:00.000Z",
                "answeredDate": null
            },
            {
                "id": 10,
                "category": "General",
                "name": "Remote A",
                "question": "Already answered",
                "answer": "Yes",
                "status": "answered",
                "date": "2024-05-01T10:00:00.000Z",
                "answeredDate": "2024-05-01T12:00:00.000Z"
            }
        ]
    })
    .to_string()
}

#[tokio::test]
async fn test_list_returns_remote_data_in_order() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/questions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(remote_questions_body())
        .create_async()
        .await;

    let store = RemoteStore::new(RemoteClient::new(&server.url()), local_with_questions());
    let questions = store.list().await.unwrap();

    mock.assert_async().await;
    let ids: Vec<i64> = questions.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![20, 10]);
    assert_eq!(questions[1].status, QuestionStatus::Answered);
}

#[tokio::test]
async fn test_list_unsuccessful_envelope_falls_back_to_local() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/questions")
        .with_status(200)
        .with_body(r#"{"success": false}"#)
        .create_async()
        .await;

    let store = RemoteStore::new(RemoteClient::new(&server.url()), local_with_questions());
    let questions = store.list().await.unwrap();

    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].question, "Local question one");
}

#[tokio::test]
async fn test_list_server_error_falls_back_to_local() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/questions")
        .with_status(500)
        .create_async()
        .await;

    let store = RemoteStore::new(RemoteClient::new(&server.url()), local_with_questions());
    assert_eq!(store.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_unreachable_falls_back_to_local() {
    let store = RemoteStore::new(RemoteClient::new(UNREACHABLE), local_with_questions());
    assert_eq!(store.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_sends_answer_and_leaves_local_untouched() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/questions/1")
        .match_body(Matcher::Json(json!({ "answer": "Remote answer" })))
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let local = local_with_questions();
    let store = RemoteStore::new(RemoteClient::new(&server.url()), local.clone());

    assert!(store.update(1, "  Remote answer ").await.unwrap());
    mock.assert_async().await;

    let snapshot = local.load().unwrap();
    assert_eq!(snapshot[0].status, QuestionStatus::Pending);
}

#[tokio::test]
async fn test_update_unreachable_mutates_local_and_reports_success() {
    let local = local_with_questions();
    let store = RemoteStore::new(RemoteClient::new(UNREACHABLE), local.clone());

    assert!(store.update(2, "Saved offline").await.unwrap());

    let question = local.load().unwrap().into_iter().find(|q| q.id == 2).unwrap();
    assert_eq!(question.status, QuestionStatus::Answered);
    assert_eq!(question.answer, "Saved offline");
    assert!(question.answered_date.is_some());
}

#[tokio::test]
async fn test_update_unsuccessful_envelope_falls_back_to_local() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("PUT", "/api/questions/1")
        .with_status(200)
        .with_body(r#"{"success": false}"#)
        .create_async()
        .await;

    let local = local_with_questions();
    let store = RemoteStore::new(RemoteClient::new(&server.url()), local.clone());

    assert!(store.update(1, "Fallback").await.unwrap());
    assert_eq!(local.load().unwrap()[0].answer, "Fallback");
}

#[tokio::test]
async fn test_update_unknown_id_still_reports_success_on_fallback() {
    let local = local_with_questions();
    let before = local.load().unwrap();
    let store = RemoteStore::new(RemoteClient::new(UNREACHABLE), local.clone());

    assert!(store.update(404, "Nobody home").await.unwrap());
    assert_eq!(local.load().unwrap(), before);
}

#[tokio::test]
async fn test_update_blank_answer_never_calls_remote() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let store = RemoteStore::new(RemoteClient::new(&server.url()), local_with_questions());

    assert!(!store.update(1, "  ").await.unwrap());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_success_remote() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/questions/2")
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let local = local_with_questions();
    let store = RemoteStore::new(RemoteClient::new(&server.url()), local.clone());

    assert!(store.delete(2).await.unwrap());
    mock.assert_async().await;
    assert_eq!(local.load().unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_unreachable_mutates_local_and_reports_success() {
    let local = local_with_questions();
    let store = RemoteStore::new(RemoteClient::new(UNREACHABLE), local.clone());

    assert!(store.delete(1).await.unwrap());

    let remaining = local.load().unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(remaining.iter().all(|q| q.id != 1));
}

#[tokio::test]
async fn test_delete_not_found_status_falls_back_to_local() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/api/questions/1")
        .with_status(404)
        .create_async()
        .await;

    let local = local_with_questions();
    let store = RemoteStore::new(RemoteClient::new(&server.url()), local.clone());

    assert!(store.delete(1).await.unwrap());
    assert_eq!(local.load().unwrap().len(), 1);
}

#[tokio::test]
async fn test_client_error_taxonomy() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/questions")
        .with_status(503)
        .create_async()
        .await;
    server
        .mock("PUT", "/api/questions/1")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;
    server
        .mock("DELETE", "/api/questions/1")
        .with_status(200)
        .with_body(r#"{"success": false}"#)
        .create_async()
        .await;

    let client = RemoteClient::new(&server.url());
    assert!(matches!(
        client.list_questions().await,
        Err(RemoteError::Status(503))
    ));
    assert!(matches!(
        client.update_answer(1, "x").await,
        Err(RemoteError::Malformed(_))
    ));
    assert!(matches!(
        client.delete_question(1).await,
        Err(RemoteError::Unsuccessful)
    ));

    let unreachable = RemoteClient::new(UNREACHABLE);
    assert!(matches!(
        unreachable.list_questions().await,
        Err(RemoteError::Network(_))
    ));
}

#[test]
fn test_client_trims_trailing_slash() {
    let client = RemoteClient::new("https://backend.example.com/");
    assert_eq!(client.base_url(), "https://backend.example.com");
}

#[tokio::test]
async fn test_list_success_without_data_is_empty() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/questions")
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let store = RemoteStore::new(RemoteClient::new(&server.url()), local_with_questions());
    let questions = store.list().await.unwrap();

    assert!(questions.is_empty());
}

#[tokio::test]
async fn test_list_malformed_body_falls_back_to_local() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/questions")
        .with_status(200)
        .with_body("<html>gateway timeout</html>")
        .create_async()
        .await;

    let store = RemoteStore::new(RemoteClient::new(&server.url()), local_with_questions());
    let questions = store.list().await.unwrap();

    let texts: Vec<&str> = questions.iter().map(|q| q.question.as_str()).collect();
    assert_eq!(texts, vec!["Local question one", "Local question two"]);
}

#[tokio::test]
async fn test_list_malformed_question_falls_back_to_local() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/questions")
        .with_status(200)
        .with_body(r#"{"success": true, "data": [{"id": "not-a-number"}]}"#)
        .create_async()
        .await;

    let store = RemoteStore::new(RemoteClient::new(&server.url()), local_with_questions());
    let questions = store.list().await.unwrap();

    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].name, "Nok");
}

#[tokio::test]
async fn test_list_client_reports_malformed_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/questions")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let err = RemoteClient::new(&server.url())
        .list_questions()
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::Malformed(_)));
}
