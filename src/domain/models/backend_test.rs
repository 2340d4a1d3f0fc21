use super::BackendName;
use super::CompletionError;

#[test]
fn it_parses_backend_names() {
    assert_eq!(BackendName::parse("finbot").unwrap(), BackendName::Finbot);
    assert_eq!(BackendName::parse("gemini").unwrap(), BackendName::Gemini);
    assert!(BackendName::parse("clippy").is_err());
}

#[test]
fn it_formats_completion_errors() {
    assert_eq!(
        CompletionError::EmptyInput.to_string(),
        "prompt text is empty"
    );
    assert_eq!(
        CompletionError::Transport("connection refused".to_string()).to_string(),
        "failed to reach the completion service: connection refused"
    );
    assert_eq!(
        CompletionError::Upstream("status 500".to_string()).to_string(),
        "completion service returned an error: status 500"
    );
}
