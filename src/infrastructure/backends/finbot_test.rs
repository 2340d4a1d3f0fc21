use anyhow::Result;

use super::Finbot;
use crate::domain::models::Backend;
use crate::domain::models::CompletionError;
use crate::domain::models::CompletionPrompt;

impl Finbot {
    fn with_url(url: String) -> Finbot {
        return Finbot {
            url,
            timeout: "1000".to_string(),
        };
    }
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/gemini")
        .with_status(405)
        .create();

    let backend = Finbot::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks_on_server_errors() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/gemini")
        .with_status(500)
        .create();

    let backend = Finbot::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_gets_completions() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/gemini")
        .match_body(r#"{"message":"Should I invest now?"}"#)
        .with_status(200)
        .with_body(r#"{"reply":"Yes, consider..."}"#)
        .create();

    let backend = Finbot::with_url(server.url());
    let res = backend
        .complete(CompletionPrompt::new("Should I invest now?".to_string()))
        .await
        .unwrap();

    mock.assert();
    assert_eq!(res, "Yes, consider...");

    return Ok(());
}

#[tokio::test]
async fn it_rejects_empty_input_before_dispatch() {
    // No server; the guard fires before any request is made.
    let backend = Finbot::with_url("http://localhost:1".to_string());
    let res = backend
        .complete(CompletionPrompt::new("   ".to_string()))
        .await;

    assert!(matches!(res, Err(CompletionError::EmptyInput)));
}

#[tokio::test]
async fn it_returns_transport_errors() {
    // Nothing listens on the discard port.
    let backend = Finbot::with_url("http://127.0.0.1:9".to_string());
    let res = backend
        .complete(CompletionPrompt::new("hello".to_string()))
        .await;

    assert!(matches!(res, Err(CompletionError::Transport(_))));
}

#[tokio::test]
async fn it_returns_upstream_errors_for_failure_statuses() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/gemini")
        .with_status(500)
        .with_body(r#"{"error":"Something went wrong talking to Gemini."}"#)
        .create();

    let backend = Finbot::with_url(server.url());
    let res = backend
        .complete(CompletionPrompt::new("hello".to_string()))
        .await;

    mock.assert();
    match res {
        Err(CompletionError::Upstream(detail)) => {
            assert!(detail.contains("status 500"));
            assert!(detail.contains("Something went wrong"));
        }
        _ => panic!("expected an upstream error"),
    }
}

#[tokio::test]
async fn it_returns_upstream_errors_for_missing_replies() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/gemini")
        .with_status(200)
        .with_body(r#"{"unexpected":"shape"}"#)
        .create();

    let backend = Finbot::with_url(server.url());
    let res = backend
        .complete(CompletionPrompt::new("hello".to_string()))
        .await;

    mock.assert();
    assert!(matches!(res, Err(CompletionError::Upstream(_))));
}
