use anyhow::Result;

use super::Candidate;
use super::CompletionRequest;
use super::Content;
use super::ContentPart;
use super::Gemini;
use super::GenerateContentResponse;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::CompletionError;
use crate::domain::models::CompletionPrompt;
use crate::domain::models::PERSONA_PREAMBLE;

impl Gemini {
    fn with_url(url: String) -> Gemini {
        return Gemini {
            url,
            token: "abc".to_string(),
            timeout: "1000".to_string(),
        };
    }
}

#[tokio::test]
async fn it_successfully_health_checks() {
    Config::set(ConfigKey::Model, "models/model-1");
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v1beta/models/model-1?key=abc")
        .with_status(200)
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks() {
    Config::set(ConfigKey::Model, "models/model-1");
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v1beta/models/model-1?key=abc")
        .with_status(500)
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_gets_completions_with_the_persona_prepended() -> Result<()> {
    Config::set(ConfigKey::Model, "models/model-1");

    let expected_req = serde_json::to_string(&CompletionRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![
                ContentPart {
                    text: PERSONA_PREAMBLE.to_string(),
                },
                ContentPart {
                    text: "User question: Should I invest now?".to_string(),
                },
            ],
        }],
    })?;

    let body = serde_json::to_string(&GenerateContentResponse {
        candidates: vec![Candidate {
            content: Content {
                role: "model".to_string(),
                parts: vec![ContentPart {
                    text: "Yes, consider...".to_string(),
                }],
            },
        }],
    })?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/model-1:generateContent?key=abc")
        .match_body(expected_req.as_str())
        .with_status(200)
        .with_body(body)
        .create();

    let backend = Gemini::with_url(server.url());
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
    let backend = Gemini::with_url("http://localhost:1".to_string());
    let res = backend
        .complete(CompletionPrompt::new("".to_string()))
        .await;

    assert!(matches!(res, Err(CompletionError::EmptyInput)));
}

#[tokio::test]
async fn it_returns_upstream_errors_for_failure_statuses() {
    Config::set(ConfigKey::Model, "models/model-1");
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/model-1:generateContent?key=abc")
        .with_status(429)
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend
        .complete(CompletionPrompt::new("hello".to_string()))
        .await;

    mock.assert();
    match res {
        Err(CompletionError::Upstream(detail)) => {
            assert!(detail.contains("429"));
        }
        _ => panic!("expected an upstream error"),
    }
}

#[tokio::test]
async fn it_returns_upstream_errors_for_empty_candidates() {
    Config::set(ConfigKey::Model, "models/model-1");
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/model-1:generateContent?key=abc")
        .with_status(200)
        .with_body(r#"{"candidates":[]}"#)
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend
        .complete(CompletionPrompt::new("hello".to_string()))
        .await;

    mock.assert();
    assert!(matches!(res, Err(CompletionError::Upstream(_))));
}
